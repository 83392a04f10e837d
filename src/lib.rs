//! FI MCP Server Library
//!
//! Exposes a library of financial-independence calculations as Model
//! Context Protocol tools. Tool schemas are generated from each function's
//! signature and markdown documentation, and the same documentation is
//! served back as `fi://help/...` resources.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the protocol handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **library**: the calculation functions
//!   - **catalog**: function registry, doc parser and schema generator
//!   - **tools**: argument binding and tool dispatch
//!   - **resources**: markdown help resources
//!
//! # Example
//!
//! ```rust,no_run
//! use fi_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone());
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
