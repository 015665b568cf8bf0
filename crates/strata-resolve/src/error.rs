//! Resolution error types.

use strata_model::ModelError;
use strata_platform::PlatformError;

/// Errors that abort the resolution of a module. No partial model is produced.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Product type or target platform problem.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Malformed variant dimensions, aliases or modifier keys.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The `Refine` edges between fragments form a cycle.
    #[error("cyclic refine dependency: '{from}' -> '{to}'")]
    CyclicDependency { from: String, to: String },

    /// Any of the above, tagged with the module it occurred in.
    #[error("module '{module}': {inner}")]
    Module {
        module: String,
        inner: Box<ResolveError>,
    },
}

impl ResolveError {
    /// Tag this error with the module being resolved.
    pub fn in_module(self, module: &str) -> Self {
        match self {
            already @ ResolveError::Module { .. } => already,
            other => ResolveError::Module {
                module: module.to_string(),
                inner: Box::new(other),
            },
        }
    }
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, ResolveError>;
