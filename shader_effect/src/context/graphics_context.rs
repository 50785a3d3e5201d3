/// GraphicsContext trait, opaque handles, and reflection records

use std::fmt;
use crate::context::{ParameterUpload, SamplerState};

// ============================================================================
// Stages and profiles
// ============================================================================

/// Programmable pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader
    Vertex,
    /// Fragment/Pixel shader
    Fragment,
}

impl ShaderStage {
    /// Both stages in binding order
    pub const ALL: [ShaderStage; 2] = [ShaderStage::Vertex, ShaderStage::Fragment];

    /// Slot index (0 = vertex, 1 = fragment)
    pub fn index(&self) -> usize {
        match self {
            ShaderStage::Vertex => 0,
            ShaderStage::Fragment => 1,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Compilation target selected for a stage
///
/// The numeric value is owned by the context; `Profile::UNKNOWN` is what a
/// context returns for a name it does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Profile(u32);

impl Profile {
    pub const UNKNOWN: Profile = Profile(0);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u32 {
        self.0
    }

    pub fn is_known(&self) -> bool {
        *self != Self::UNKNOWN
    }
}

// ============================================================================
// Handles
// ============================================================================

/// Handle to a program object living inside the context
///
/// `ProgramHandle::NULL` is what a failed compilation hands back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(u64);

impl ProgramHandle {
    pub const NULL: ProgramHandle = ProgramHandle(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Handle to one global parameter of one program
///
/// Only meaningful for the program it was enumerated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterHandle(u64);

impl ParameterHandle {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

// ============================================================================
// Compilation
// ============================================================================

/// Input for `GraphicsContext::create_program`
#[derive(Debug, Clone, Copy)]
pub struct ProgramDesc<'a> {
    pub stage: ShaderStage,
    pub profile: Profile,
    pub entry_point: &'a str,
    /// Full compilation unit
    pub source: &'a str,
}

/// Which phase rejected the program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileErrorKind {
    /// The compiler itself rejected the source; a listing is usually available
    Compiler,
    /// Any other failure (bad profile, context state)
    Other,
}

/// Error reported by the context alongside a (possibly null) program
#[derive(Debug, Clone, PartialEq)]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub message: String,
    /// Full compiler listing (only for `CompileErrorKind::Compiler`)
    pub listing: Option<String>,
}

/// Result of `GraphicsContext::create_program`
///
/// Compilation never aborts: `program` is always present, and is
/// `ProgramHandle::NULL` when nothing usable was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramCreation {
    pub program: ProgramHandle,
    pub error: Option<CompileError>,
}

// ============================================================================
// Reflection
// ============================================================================

/// Parameter class as reported by the compiled program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterClass {
    Scalar,
    Vector,
    Matrix,
    Array,
    Sampler,
    /// Structured aggregate
    Struct,
    /// Opaque object (textures, interfaces, ...)
    Object,
}

impl ParameterClass {
    /// Leaf classes are bound by passes; aggregates and objects never are
    pub fn is_leaf(&self) -> bool {
        !matches!(self, ParameterClass::Struct | ParameterClass::Object)
    }
}

/// One global-scope parameter of a compiled program
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramParameter {
    pub handle: ParameterHandle,
    pub name: String,
    pub class: ParameterClass,
    /// Whether the program actually reads the parameter
    pub referenced: bool,
}

// ============================================================================
// GraphicsContext trait
// ============================================================================

/// The graphics API a pass compiles against and binds into
///
/// A context is single-threaded mutable state: methods take `&self` and
/// implementations use interior mutability, the way GL-style APIs behave.
/// Passes share it as `Rc<dyn GraphicsContext>`, which also keeps effects
/// on the thread that owns the context.
pub trait GraphicsContext {
    // ===== PROFILES =====

    /// Newest profile the context supports for `stage`
    fn latest_profile(&self, stage: ShaderStage) -> Profile;

    /// Profile for a named target (`Profile::UNKNOWN` if unrecognized)
    fn profile_by_name(&self, name: &str) -> Profile;

    // ===== PROGRAMS =====

    /// Compile a program from source; never fails hard
    fn create_program(&self, desc: &ProgramDesc<'_>) -> ProgramCreation;

    /// Upload a compiled program to the device
    fn load_program(&self, program: ProgramHandle);

    /// Release a program and every handle enumerated from it
    fn destroy_program(&self, program: ProgramHandle);

    /// Global-scope parameters of `program`, in declaration order
    fn global_parameters(&self, program: ProgramHandle) -> Vec<ProgramParameter>;

    /// Make `program` current for its stage
    fn bind_program(&self, program: ProgramHandle);

    fn enable_profile(&self, profile: Profile);

    fn disable_profile(&self, profile: Profile);

    // ===== PARAMETERS =====

    /// Push one parameter value into the bound program
    fn set_parameter(&self, parameter: ParameterHandle, value: ParameterUpload<'_>);

    /// Texture unit the program assigned to a sampler parameter
    fn texture_unit(&self, parameter: ParameterHandle) -> u32;

    // ===== TEXTURE UNITS =====

    /// Bind sampler state and texture to a texture unit
    fn set_sampler(&self, unit: u32, sampler: &SamplerState);

    /// Unbind and disable a texture unit
    fn disable_sampler(&self, unit: u32);
}
