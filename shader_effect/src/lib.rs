/*!
# Shader Effect

Technique → pass → compiled program → bound parameters pipeline for
programmable-shader effects, over a pluggable graphics context.

An effect declares typed parameters, shader source blocks and techniques.
Reading the effect compiles every pass's vertex and fragment programs once,
against a compilation unit made of the parameter declarations followed by
the shader blocks, and caches which parameters each program actually uses.
Each draw then activates a pass, which pushes only the parameters written
since the last frame boundary and binds sampler texture units.

## Architecture

- **GraphicsContext**: trait implemented by the backend (compile, reflect,
  bind, upload)
- **Effect**: parameter table, shader blocks, techniques
- **Technique**: ordered passes, rendered one after another
- **Pass**: read/begin/end protocol over two compiled programs
- **EffectParameter**: typed value plus coalescing dirty flag

Everything is single-threaded: parameters and programs are shared through
`Rc`, matching the one-context-per-thread model of graphics APIs.
*/

// Internal modules
mod error;
mod runtime;
pub mod log;
pub mod context;
pub mod effect;

// Main fx namespace module
pub mod fx {
    // Error types
    pub use crate::error::{Error, Result};

    // Logger registry
    pub use crate::runtime::Runtime;

    // Effect entry point
    pub use crate::effect::Effect;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Graphics context seam
    pub mod context {
        pub use crate::context::*;
    }

    // Effect model: parameters, passes, techniques
    pub mod render {
        pub use crate::effect::*;
    }
}

// Re-export math library at crate root
pub use glam;
