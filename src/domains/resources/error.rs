//! Resource-specific error types.

use thiserror::Error;

/// Addressing errors when reading documentation resources.
///
/// Unlike tool errors these are surfaced to the client as protocol errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceError {
    /// The URI is outside the documentation scheme.
    #[error("Unknown resource URI: {0}")]
    InvalidUri(String),

    /// The URI names a function that is not registered.
    #[error("Unknown function: {0}")]
    NotFound(String),
}

impl ResourceError {
    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }

    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
