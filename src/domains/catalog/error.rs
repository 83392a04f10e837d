//! Catalog-specific error types.

use thiserror::Error;

/// Errors raised while turning a registered function into a tool schema.
///
/// These never abort catalog construction: the offending function is
/// logged and left out of the tool listing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The function carries no documentation at all.
    #[error("Function `{0}` is missing a docstring")]
    MissingDocumentation(String),

    /// Documentation exists but has nothing before its first section heading.
    #[error("Docstring for `{0}` has no description section")]
    EmptyDescription(String),
}

/// A single argument could not be converted into the parameter's Rust type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    /// The JSON value has the wrong shape for the declared type.
    #[error("argument `{name}` expected {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: String,
        found: &'static str,
    },

    /// The JSON value has the right shape but an unusable content.
    #[error("argument `{name}` is invalid: {reason}")]
    Invalid { name: String, reason: String },
}

impl ArgError {
    /// Create a new "type mismatch" error.
    pub fn type_mismatch(
        name: impl Into<String>,
        expected: impl Into<String>,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            name: name.into(),
            expected: expected.into(),
            found,
        }
    }

    /// Create a new "invalid" error.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Failures raised while running a registered function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// A bound argument did not convert to its declared type.
    #[error(transparent)]
    Argument(#[from] ArgError),

    /// The positional list does not match the declared parameter count.
    #[error("expected {expected} positional arguments, got {received}")]
    Arity { expected: usize, received: usize },

    /// No positional value was supplied for a parameter.
    #[error("no value bound for `{0}`")]
    Unbound(String),

    /// The calculation itself rejected its inputs.
    #[error("{0}")]
    Calculation(String),

    /// The function panicked or its worker task was lost.
    #[error("function aborted: {0}")]
    Aborted(String),
}
