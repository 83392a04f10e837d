//! MCP Server implementation and lifecycle management.
//!
//! The handler owns the catalog built at startup and delegates protocol
//! messages to the tool and resource services. The catalog is read-only
//! after construction, so clones of the server share it freely across
//! connections.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    catalog::{Catalog, ToolSummary},
    resources::ResourceService,
    tools::ToolService,
};

const INSTRUCTIONS: &str = "Financial independence calculators. Each tool wraps one \
    calculation function; read fi://help/all or fi://help/<function_name> for full \
    documentation of the inputs and results.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Functions and their published schemas.
    catalog: Arc<Catalog>,

    /// Service for handling tool-related requests.
    tool_service: Arc<ToolService>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,
}

impl McpServer {
    /// Create a new MCP server, discovering and publishing the catalog.
    pub fn new(config: Config) -> Self {
        let catalog = Arc::new(Catalog::initialize(&config.catalog));
        Self::with_catalog(config, catalog)
    }

    /// Create a server over an existing catalog.
    pub fn with_catalog(config: Config, catalog: Arc<Catalog>) -> Self {
        Self {
            config: Arc::new(config),
            tool_service: Arc::new(ToolService::new(catalog.clone())),
            resource_service: Arc::new(ResourceService::new(catalog.clone())),
            catalog,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the catalog.
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Per-tool overview for the startup log.
    pub fn summary(&self) -> BTreeMap<String, ToolSummary> {
        self.catalog.summary()
    }

    fn instructions(&self) -> String {
        INSTRUCTIONS.replace("fi://", &format!("{}://", self.catalog.resource_scheme()))
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools_json(&self) -> Vec<serde_json::Value> {
        self.tool_service
            .list_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// Failures of the call itself are carried inside the result with
    /// `isError` set; only serialization can fail here.
    pub async fn call_tool_json(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, String> {
        let arguments = match arguments {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Object(map)) => Some(map),
            Some(other) => {
                return Err(format!("arguments must be an object, got {other}"));
            }
        };
        let result = self.tool_service.call_tool(name, arguments).await;
        serde_json::to_value(result).map_err(|e| e.to_string())
    }

    /// List all available resources (for HTTP transport).
    pub fn list_resources_json(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resources()
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub fn read_resource_json(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri) {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }

    /// List all available resource templates (for HTTP transport).
    pub fn list_resource_templates_json(&self) -> Vec<serde_json::Value> {
        self.resource_service
            .list_resource_templates()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.tool_service.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .tool_service
            .call_tool(&request.name, request.arguments)
            .await)
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        Ok(ListResourcesResult {
            resources: self.resource_service.list_resources(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        Ok(ListResourceTemplatesResult {
            resource_templates: self.resource_service.list_resource_templates(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn server() -> McpServer {
        McpServer::new(Config::default())
    }

    #[test]
    fn test_server_info() {
        let server = server();
        assert_eq!(server.name(), "fi-mcp");
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_none());
        assert!(info.instructions.is_some_and(|text| text.contains("fi://help/all")));
    }

    #[test]
    fn test_list_tools_json() {
        let tools = server().list_tools_json();
        assert_eq!(tools.len(), 16);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_call_tool_json_success_and_error() {
        let server = server();
        let value = assert_ok!(
            server
                .call_tool_json("fi_rule_of_72", Some(json!({"interest_rate": 8})))
                .await
        );
        assert_eq!(value["isError"], json!(false));
        assert_eq!(value["content"][0]["text"], json!("9"));

        let value = assert_ok!(server.call_tool_json("fi_nope", None).await);
        assert_eq!(value["isError"], json!(true));
        assert_eq!(value["content"][0]["text"], json!("Error: Unknown function: nope"));
    }

    #[tokio::test]
    async fn test_call_tool_json_rejects_non_object_arguments() {
        let result = server().call_tool_json("fi_rule_of_72", Some(json!([8]))).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_resources_json() {
        let server = server();
        assert_eq!(server.list_resources_json().len(), 17);
        assert_eq!(server.list_resource_templates_json().len(), 1);

        let value = assert_ok!(server.read_resource_json("fi://help/future_value"));
        assert_eq!(value["contents"][0]["mimeType"], json!("text/markdown"));
        assert!(server.read_resource_json("fi://help/unknown").is_err());
    }

    #[test]
    fn test_instructions_follow_resource_scheme() {
        let mut config = Config::default();
        config.catalog.resource_scheme = "money".to_string();
        let server = McpServer::new(config);
        assert!(server.instructions().contains("money://help/all"));
    }
}
