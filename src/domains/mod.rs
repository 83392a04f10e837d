//! Domains module containing business logic organized by bounded contexts.
//!
//! `library` holds the calculations, `catalog` turns them into tool
//! schemas, and `tools` and `resources` serve them to clients.

pub mod catalog;
pub mod library;
pub mod resources;
pub mod tools;
