/// Effect configuration

/// Behavior switches for compiling an effect's passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectConfig {
    /// Report compile diagnostics (message, source, listing) through the logger
    pub verbose_diagnostics: bool,

    /// Resolve a named fragment profile from the vertex stage's profile name
    ///
    /// Off by default. Turning it on reproduces effects authored against
    /// runtimes that looked the fragment profile up this way.
    pub reuse_vertex_profile_name: bool,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            verbose_diagnostics: cfg!(debug_assertions),
            reuse_vertex_profile_name: false,
        }
    }
}
