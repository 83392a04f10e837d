//! Tools domain module.
//!
//! Tools are generated from the catalog: one tool per registered function,
//! named `<prefix>_<function_name>`. This module lists them and executes
//! calls against the underlying functions.
//!
//! ## Architecture
//!
//! - `binder.rs` - Keyed payload to positional argument projection
//! - `service.rs` - Tool listing and call dispatch
//! - `error.rs` - Tool-specific error types

pub mod binder;
mod error;
mod service;

pub use binder::{BindError, bind, missing_required};
pub use error::ToolError;
pub use service::ToolService;
