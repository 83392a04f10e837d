//! Library domain module.
//!
//! The financial independence calculation library. Every function is a
//! pure calculation declared through [`fi_library!`](crate::fi_library),
//! so its signature and doc comments are the single source for the tool
//! catalog.
//!
//! ## Adding a New Function
//!
//! Declare it inside the `fi_library!` block of the matching module with
//! a description paragraph and an `### Args:` section. Nothing else needs
//! registering: `exports()` picks it up.

mod error;
pub mod growth;
pub mod income;
pub mod independence;
pub mod spending;

use crate::domains::catalog::FunctionEntry;

pub use error::CalcError;
pub use income::{Figure, NumType};

/// Registration entries for every library function.
pub fn exports() -> Vec<FunctionEntry> {
    [
        growth::exports(),
        income::exports(),
        independence::exports(),
        spending::exports(),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports_are_uniquely_named() {
        let entries = exports();
        let mut names: Vec<_> = entries.iter().map(FunctionEntry::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), entries.len());
        assert_eq!(entries.len(), 16);
    }

    #[test]
    fn test_every_export_is_documented() {
        for entry in exports() {
            let doc = entry.doc().unwrap_or_default();
            assert!(doc.contains("### Args:"), "{} lacks an Args section", entry.name());
        }
    }
}
