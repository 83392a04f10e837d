//! Error types for starting and running the FI MCP server.
//!
//! Domain failures stay inside their domain and reach clients as tool or
//! resource errors; only startup and transport failures end the process.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// An `MCP_*` setting was rejected at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while running a transport.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
