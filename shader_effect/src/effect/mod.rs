/// Effect model: parameters, shader compilation, passes and techniques

pub mod param_type;
pub mod param_value;
pub mod parameter;
pub mod render_state;
pub mod config;
pub mod shader_compiler;
pub mod descriptor;
pub mod pass;
pub mod technique;
pub mod effect;

pub use param_type::ParamType;
pub use param_value::ParamValue;
pub use parameter::{EffectParameter, ParameterTable};
pub use render_state::{
    RenderState, RenderStateCode, RenderStateValue, ShaderDesc, AUTO_PROFILE,
};
pub use config::EffectConfig;
pub use shader_compiler::{Compilation, CompileDiagnostic, CompiledProgram, ShaderCompiler};
pub use descriptor::ParameterDescriptor;
pub use pass::{ActivePass, Pass};
pub use technique::Technique;
pub use effect::{Effect, EffectResources};
