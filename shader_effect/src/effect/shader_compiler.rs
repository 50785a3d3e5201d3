/// ShaderCompiler - compiles stage programs and reports diagnostics
///
/// Compilation never aborts the caller. A failed compile still yields a
/// `CompiledProgram` (holding whatever handle the context returned, usually
/// null) plus a `CompileDiagnostic`. Diagnostics are written to the logger
/// only when `EffectConfig::verbose_diagnostics` is set.

use std::fmt;
use std::rc::Rc;

use crate::context::{
    CompileErrorKind, GraphicsContext, Profile, ProgramDesc, ProgramHandle, ShaderStage,
};
use crate::effect::render_state::AUTO_PROFILE;
use crate::effect::EffectConfig;
use crate::{engine_error, engine_trace};

const SOURCE: &str = "fx::ShaderCompiler";

// ===== DIAGNOSTIC =====

/// Compile failure report for one stage
#[derive(Debug, Clone, PartialEq)]
pub struct CompileDiagnostic {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub message: String,
    /// Compiler listing (only for compiler-stage errors)
    pub listing: Option<String>,
}

impl fmt::Display for CompileDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} program '{}': {}", self.stage, self.entry_point, self.message)?;
        if let Some(listing) = &self.listing {
            write!(f, "\n{}", listing)?;
        }
        Ok(())
    }
}

// ===== COMPILED PROGRAM =====

/// A program owned by exactly one pass stage
///
/// Released on drop through the context that created it.
pub struct CompiledProgram {
    handle: ProgramHandle,
    stage: ShaderStage,
    profile: Profile,
    context: Rc<dyn GraphicsContext>,
}

impl CompiledProgram {
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// False when compilation produced no program
    pub fn is_valid(&self) -> bool {
        !self.handle.is_null()
    }

    /// Upload to the device
    pub fn load(&self) {
        self.context.load_program(self.handle);
    }

    /// Whether `context` is the context that created this program
    pub fn belongs_to(&self, context: &dyn GraphicsContext) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.context), context as *const dyn GraphicsContext)
    }
}

impl fmt::Debug for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledProgram")
            .field("handle", &self.handle)
            .field("stage", &self.stage)
            .field("profile", &self.profile)
            .finish()
    }
}

impl Drop for CompiledProgram {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        engine_trace!(SOURCE, "Releasing {} program {:?}", self.stage, self.handle);
        self.context.destroy_program(self.handle);
    }
}

/// Program plus the diagnostic of a failed compile
#[derive(Debug)]
pub struct Compilation {
    pub program: CompiledProgram,
    pub diagnostic: Option<CompileDiagnostic>,
}

// ===== SHADER COMPILER =====

#[derive(Debug, Clone, Default)]
pub struct ShaderCompiler {
    config: EffectConfig,
}

impl ShaderCompiler {
    pub fn new(config: EffectConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Map a profile token to a context profile
    ///
    /// `"auto"` picks the newest profile the context supports for `stage`,
    /// at compile time rather than when the effect was authored.
    pub fn resolve_profile(
        &self,
        context: &dyn GraphicsContext,
        stage: ShaderStage,
        requested: &str,
    ) -> Profile {
        if requested == AUTO_PROFILE {
            context.latest_profile(stage)
        } else {
            context.profile_by_name(requested)
        }
    }

    /// Compile `source` for one stage
    pub fn compile(
        &self,
        context: &Rc<dyn GraphicsContext>,
        stage: ShaderStage,
        profile: Profile,
        entry_point: &str,
        source: &str,
    ) -> Compilation {
        let created = context.create_program(&ProgramDesc {
            stage,
            profile,
            entry_point,
            source,
        });

        let program = CompiledProgram {
            handle: created.program,
            stage,
            profile,
            context: context.clone(),
        };

        let diagnostic = created.error.map(|error| CompileDiagnostic {
            stage,
            entry_point: entry_point.to_string(),
            message: error.message,
            listing: match error.kind {
                CompileErrorKind::Compiler => error.listing,
                CompileErrorKind::Other => None,
            },
        });

        match &diagnostic {
            Some(diagnostic) if self.config.verbose_diagnostics => {
                engine_error!(SOURCE, "Failed to compile {} program '{}': {}",
                    stage, entry_point, diagnostic.message);
                engine_error!(SOURCE, "Compilation unit:\n{}", source);
                if let Some(listing) = &diagnostic.listing {
                    engine_error!(SOURCE, "Compiler listing:\n{}", listing);
                }
            }
            Some(_) => {}
            None => {
                engine_trace!(SOURCE, "Compiled {} program '{}' as {:?}",
                    stage, entry_point, program.handle);
            }
        }

        Compilation { program, diagnostic }
    }
}

#[cfg(test)]
#[path = "shader_compiler_tests.rs"]
mod tests;
