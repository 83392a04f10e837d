//! Tool-specific error types.
//!
//! Every variant is reported to the client as an `Error: ...` text result,
//! never as a protocol fault.

use thiserror::Error;

use super::binder::BindError;
use crate::domains::catalog::InvocationError;

/// Errors that can occur while dispatching a tool call.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool name does not carry the catalog prefix.
    #[error("Invalid tool name: {0}")]
    InvalidName(String),

    /// The prefix matched but no function has that name.
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Required arguments are absent from the payload.
    #[error("Missing required arguments: {}", .0.join(", "))]
    MissingArguments(Vec<String>),

    /// The payload could not be projected onto the parameter list.
    #[error("Failed to convert arguments: {0}")]
    Binding(#[from] BindError),

    /// The function itself failed.
    #[error("Error executing {tool}: {source}")]
    Execution {
        tool: String,
        #[source]
        source: InvocationError,
    },
}

impl ToolError {
    /// Create a new "execution" error.
    pub fn execution(tool: impl Into<String>, source: InvocationError) -> Self {
        Self::Execution {
            tool: tool.into(),
            source,
        }
    }

    /// The text returned to the client.
    pub fn to_message(&self) -> String {
        format!("Error: {self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arguments_lists_names() {
        let err = ToolError::MissingArguments(vec!["present_value".into(), "annual_rate".into()]);
        assert_eq!(
            err.to_message(),
            "Error: Missing required arguments: present_value, annual_rate"
        );
    }

    #[test]
    fn test_execution_preserves_original_message() {
        let err = ToolError::execution(
            "fi_rule_of_72",
            InvocationError::Calculation("interest_rate must be greater than zero, got 0".into()),
        );
        assert_eq!(
            err.to_message(),
            "Error: Error executing fi_rule_of_72: interest_rate must be greater than zero, got 0"
        );
    }
}
