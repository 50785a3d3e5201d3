/// Sampler state carried by `sampler` effect parameters

use glam::Vec4;

/// Handle to a texture owned by the context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Texture filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFilter {
    Point,
    Bilinear,
    Trilinear,
    Anisotropic,
}

/// Texture coordinate addressing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    Wrap,
    Mirror,
    Clamp,
    Border,
}

/// Texture + sampling state bound to a texture unit
#[derive(Debug, Clone, PartialEq)]
pub struct SamplerState {
    /// Bound texture (None = unit enabled with no texture)
    pub texture: Option<TextureHandle>,
    pub filter: TextureFilter,
    pub address_u: AddressMode,
    pub address_v: AddressMode,
    pub address_w: AddressMode,
    pub max_anisotropy: u32,
    /// Used with `AddressMode::Border`
    pub border_color: Vec4,
}

impl SamplerState {
    /// Default state sampling `texture`
    pub fn with_texture(texture: TextureHandle) -> Self {
        Self {
            texture: Some(texture),
            ..Default::default()
        }
    }

    /// Same address mode on all three axes
    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_u = mode;
        self.address_v = mode;
        self.address_w = mode;
        self
    }

    pub fn with_filter(mut self, filter: TextureFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            texture: None,
            filter: TextureFilter::Bilinear,
            address_u: AddressMode::Wrap,
            address_v: AddressMode::Wrap,
            address_w: AddressMode::Wrap,
            max_anisotropy: 1,
            border_color: Vec4::ZERO,
        }
    }
}
