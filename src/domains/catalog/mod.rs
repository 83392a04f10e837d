//! Catalog domain module.
//!
//! This module turns the calculation library into a tool catalog without
//! per-function boilerplate.
//!
//! ## Architecture
//!
//! - `types.rs` - Structural parameter type descriptors and conversions
//! - `registry.rs` - Function registration (`fi_library!`) and discovery
//! - `docs.rs` - Markdown documentation parser
//! - `schema.rs` - Tool schema generation and tool naming
//! - `service.rs` - The immutable `Catalog` built at startup
//! - `error.rs` - Catalog-specific error types

pub mod docs;
mod error;
pub mod registry;
pub mod schema;
mod service;
pub mod types;

pub use docs::{ParsedDoc, clean_doc, describe_parameter};
pub use error::{ArgError, InvocationError, SchemaError};
pub use registry::{
    FunctionEntry, Invoker, ParameterSpec, Registry, discover, discover_from, next_arg,
};
pub use schema::{PropertySchema, ToolNaming, ToolSchema, build_all, build_schema};
pub use service::{Catalog, ToolSummary};
pub use types::{ArgType, TypeDescriptor};
