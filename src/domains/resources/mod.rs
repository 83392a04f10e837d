//! Resources domain module.
//!
//! Serves markdown documentation for every catalog function:
//!
//! - `<scheme>://help/<function_name>` - help for one function
//! - `<scheme>://help/all` - help for every function, in name order
//!
//! - `formatting.rs` - markdown rendering and display names
//! - `registry.rs` - URIs, resource metadata and templates
//! - `service.rs` - listing and reading

mod error;
pub mod formatting;
pub mod registry;
mod service;

pub use error::ResourceError;
pub use formatting::{NO_DOCUMENTATION_AVAILABLE, display_name, format_help};
pub use registry::{help_uri, resource_templates};
pub use service::ResourceService;
