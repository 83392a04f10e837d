//! Tool service - lists and executes catalog tools.
//!
//! Invocation resolves the tool name to a registered function, checks for
//! missing required arguments, binds the payload positionally, and runs the
//! function on the blocking pool. Every failure becomes an `Error: ...` text
//! result so the protocol channel stays healthy.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{error, info, instrument, warn};

use super::binder::{bind, missing_required};
use super::error::ToolError;
use crate::domains::catalog::{Catalog, InvocationError};

/// Service for listing and calling catalog tools.
pub struct ToolService {
    catalog: Arc<Catalog>,
}

impl ToolService {
    /// Create a new ToolService over the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// List every published tool, sorted by name.
    pub fn list_tools(&self) -> Vec<Tool> {
        let tools: Vec<Tool> = self
            .catalog
            .schemas()
            .values()
            .map(|schema| schema.to_tool())
            .collect();
        info!("Listed {} FI tools", tools.len());
        tools
    }

    /// Call a tool by name. Never fails at the protocol level.
    #[instrument(skip(self, arguments))]
    pub async fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        let payload = arguments.unwrap_or_default();
        info!("Calling tool: {} with arguments: {:?}", name, payload);

        match self.dispatch(name, &payload).await {
            Ok(text) => {
                info!("Tool {} executed successfully: {}", name, text);
                CallToolResult::success(vec![Content::text(text)])
            }
            Err(e) => {
                match &e {
                    ToolError::Execution { .. } => error!("{}", e),
                    _ => warn!("{}", e),
                }
                CallToolResult::error(vec![Content::text(e.to_message())])
            }
        }
    }

    async fn dispatch(&self, name: &str, payload: &JsonObject) -> Result<String, ToolError> {
        let function_name = self
            .catalog
            .naming()
            .function_name(name)
            .ok_or_else(|| ToolError::InvalidName(name.to_string()))?;

        let entry = self
            .catalog
            .function(function_name)
            .ok_or_else(|| ToolError::UnknownFunction(function_name.to_string()))?;

        let missing = missing_required(entry.params(), payload);
        if !missing.is_empty() {
            return Err(ToolError::MissingArguments(missing));
        }

        let args = bind(entry.params(), payload)?;

        // Runs off the dispatch loop. A panic surfaces as a JoinError.
        let invoker = entry.invoker();
        let outcome = tokio::task::spawn_blocking(move || invoker(&args))
            .await
            .map_err(|e| InvocationError::Aborted(e.to_string()))
            .and_then(|result| result);

        outcome.map_err(|source| ToolError::execution(name, source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CatalogConfig;
    use crate::domains::catalog::{FunctionEntry, discover_from};
    use rmcp::model::RawContent;
    use serde_json::{Value, json};
    use tokio_test::assert_ok;

    fn service() -> ToolService {
        ToolService::new(Arc::new(Catalog::initialize(&CatalogConfig::default())))
    }

    fn payload(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn text_of(result: &CallToolResult) -> String {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => text.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_list_tools_matches_catalog() {
        let service = service();
        let tools = service.list_tools();
        assert_eq!(tools.len(), 16);
        assert!(tools.iter().all(|t| t.name.starts_with("fi_")));
        assert!(tools.iter().any(|t| t.name == "fi_future_value"));
        for tool in &tools {
            assert_eq!(tool.input_schema["additionalProperties"], json!(false));
        }
    }

    #[tokio::test]
    async fn test_future_value_grows() {
        let result = service()
            .call_tool(
                "fi_future_value",
                payload(json!({"present_value": 1000, "annual_rate": 7, "periods_per_year": 1, "years": 10})),
            )
            .await;
        assert_eq!(result.is_error, Some(false));
        let value: f64 = assert_ok!(text_of(&result).parse());
        assert!(value > 1000.0);
    }

    #[tokio::test]
    async fn test_take_home_pay() {
        let result = service()
            .call_tool(
                "fi_take_home_pay",
                payload(json!({"gross_pay": 8528, "employer_match": 652, "taxes_and_fees": [712, 100, 50.0]})),
            )
            .await;
        let value: f64 = assert_ok!(text_of(&result).parse());
        assert_eq!(value, 8318.0);
    }

    #[tokio::test]
    async fn test_literal_argument_changes_rendering() {
        let result = service()
            .call_tool(
                "fi_take_home_pay",
                payload(json!({"gross_pay": 100, "employer_match": 0, "taxes_and_fees": [], "numtype": "decimal"})),
            )
            .await;
        assert_eq!(text_of(&result), "100.00");
    }

    #[tokio::test]
    async fn test_invalid_prefix_is_rejected() {
        let result = service()
            .call_tool("fx_future_value", payload(json!({"present_value": 1, "annual_rate": 1})))
            .await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Error: Invalid tool name: fx_future_value");
    }

    #[tokio::test]
    async fn test_unknown_function_is_rejected() {
        let result = service().call_tool("fi_retire_tomorrow", None).await;
        assert_eq!(text_of(&result), "Error: Unknown function: retire_tomorrow");
    }

    #[tokio::test]
    async fn test_missing_arguments_are_named() {
        let result = service().call_tool("fi_future_value", None).await;
        assert_eq!(
            text_of(&result),
            "Error: Missing required arguments: present_value, annual_rate"
        );
    }

    #[tokio::test]
    async fn test_calculation_error_is_text() {
        let result = service()
            .call_tool("fi_rule_of_72", payload(json!({"interest_rate": 0})))
            .await;
        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("Error: Error executing fi_rule_of_72:"));
        assert!(text.contains("interest_rate must be greater than zero"));
    }

    #[tokio::test]
    async fn test_extreme_age_returns_promptly_as_text() {
        let arguments = json!({
            "eval_age": i64::MIN,
            "current_savings": 0,
            "annual_savings": 0,
            "target_fi_num": 1,
            "annual_rate": 0
        });
        let result = service().call_tool("fi_fi_age", payload(arguments)).await;
        assert_eq!(result.is_error, Some(true));
        let text = text_of(&result);
        assert!(text.starts_with("Error: Error executing fi_fi_age:"));
        assert!(text.contains("eval_age must be between 0 and 120"));
    }

    #[tokio::test]
    async fn test_wrong_argument_type_is_text() {
        let result = service()
            .call_tool(
                "fi_future_value",
                payload(json!({"present_value": "lots", "annual_rate": 7})),
            )
            .await;
        let text = text_of(&result);
        assert!(text.contains("present_value"));
        assert!(text.contains("expected float"));
    }

    #[tokio::test]
    async fn test_panic_is_caught() {
        let registry = discover_from([FunctionEntry::new(
            "explode",
            "Always panics.",
            vec![],
            |_| panic!("boom"),
        )]);
        let catalog = Catalog::from_registry(&CatalogConfig::default(), registry);
        let service = ToolService::new(Arc::new(catalog));

        let result = service.call_tool("fi_explode", None).await;
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error: Error executing fi_explode: function aborted"));
    }
}
