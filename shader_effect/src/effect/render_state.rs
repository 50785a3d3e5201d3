/// Pass render states
///
/// A pass carries an ordered list of states. Shader stage selection is
/// itself a state (`vertex_shader` / `pixel_shader`) whose value names the
/// profile and entry point of that stage.

use crate::context::ShaderStage;

/// Profile token that resolves to the newest profile of the active context
pub const AUTO_PROFILE: &str = "auto";

/// State codes, addressed by name in effect descriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderStateCode {
    VertexShader,
    PixelShader,
    CullMode,
    PolygonMode,
    DepthEnable,
    DepthWriteMask,
    AlphaBlendEnable,
}

impl RenderStateCode {
    const NAMES: [(&'static str, RenderStateCode); 7] = [
        ("vertex_shader", RenderStateCode::VertexShader),
        ("pixel_shader", RenderStateCode::PixelShader),
        ("cull_mode", RenderStateCode::CullMode),
        ("polygon_mode", RenderStateCode::PolygonMode),
        ("depth_enable", RenderStateCode::DepthEnable),
        ("depth_write_mask", RenderStateCode::DepthWriteMask),
        ("alpha_blend_enable", RenderStateCode::AlphaBlendEnable),
    ];

    pub fn from_name(name: &str) -> Option<RenderStateCode> {
        Self::NAMES.iter().find(|(n, _)| *n == name).map(|(_, code)| *code)
    }

    pub fn name(&self) -> &'static str {
        Self::NAMES
            .iter()
            .find(|(_, code)| code == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }

    /// Stage-selection code for a shader stage
    pub fn for_stage(stage: ShaderStage) -> RenderStateCode {
        match stage {
            ShaderStage::Vertex => RenderStateCode::VertexShader,
            ShaderStage::Fragment => RenderStateCode::PixelShader,
        }
    }
}

/// Profile and entry point selected for one stage
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShaderDesc {
    /// Profile name, or `AUTO_PROFILE`
    pub profile: String,
    /// Entry point name; empty means the stage is absent
    pub entry_point: String,
}

impl ShaderDesc {
    pub fn new(profile: &str, entry_point: &str) -> Self {
        Self {
            profile: profile.to_string(),
            entry_point: entry_point.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderStateValue {
    Shader(ShaderDesc),
    Bool(bool),
    Uint(u32),
}

/// One (code, value) entry of a pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub code: RenderStateCode,
    pub value: RenderStateValue,
}

impl RenderState {
    pub fn new(code: RenderStateCode, value: RenderStateValue) -> Self {
        Self { code, value }
    }

    /// Stage-selection state
    pub fn shader(stage: ShaderStage, profile: &str, entry_point: &str) -> Self {
        Self {
            code: RenderStateCode::for_stage(stage),
            value: RenderStateValue::Shader(ShaderDesc::new(profile, entry_point)),
        }
    }
}

#[cfg(test)]
#[path = "render_state_tests.rs"]
mod tests;
