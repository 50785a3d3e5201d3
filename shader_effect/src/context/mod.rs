/// Graphics context module - the seam between effects and a graphics API

// Module declarations
pub mod graphics_context;
pub mod parameter_upload;
pub mod sampler;

// Re-exports
pub use graphics_context::*;
pub use parameter_upload::*;
pub use sampler::*;

// Recording context for unit tests (no GPU required)
#[cfg(test)]
pub mod mock_context;
