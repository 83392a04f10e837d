//! Core module containing shared infrastructure components.
//!
//! Error handling, configuration, the protocol handler, and the transport
//! layer that carries it.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{CatalogConfig, Config};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
