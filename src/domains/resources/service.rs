//! Resource service - lists and reads function documentation.
//!
//! Every registered function gets a markdown help resource; the aggregate
//! resource concatenates all of them in name order.

use std::sync::Arc;

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use tracing::{debug, info};

use super::error::ResourceError;
use super::formatting::{DIVIDER, format_help};
use super::registry::{
    AGGREGATE_NAME, MARKDOWN_MIME_TYPE, aggregate_resource, function_resource, help_prefix,
    resource_templates,
};
use crate::domains::catalog::Catalog;

/// Service for listing and reading documentation resources.
pub struct ResourceService {
    catalog: Arc<Catalog>,
}

impl ResourceService {
    /// Create a new ResourceService over the given catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// One help resource per function, sorted by name, then the aggregate.
    pub fn list_resources(&self) -> Vec<Resource> {
        let scheme = self.catalog.resource_scheme();
        let mut resources: Vec<Resource> = self
            .catalog
            .functions()
            .keys()
            .map(|name| function_resource(scheme, name))
            .collect();
        resources.push(aggregate_resource(scheme));

        info!("Listed {} help resources", resources.len());
        resources
    }

    /// The per-function help URI template.
    pub fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        resource_templates(self.catalog.resource_scheme())
    }

    /// Render the markdown document addressed by `uri`.
    pub fn read_markdown(&self, uri: &str) -> Result<String, ResourceError> {
        let prefix = help_prefix(self.catalog.resource_scheme());
        let target = uri
            .strip_prefix(prefix.as_str())
            .ok_or_else(|| ResourceError::invalid_uri(uri))?;

        if target == AGGREGATE_NAME {
            return Ok(self.render_all());
        }

        let entry = self
            .catalog
            .function(target)
            .ok_or_else(|| ResourceError::not_found(target))?;
        Ok(format_help(entry.name(), entry.doc(), 1))
    }

    /// Read a resource by URI.
    pub fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        debug!("Reading resource: {}", uri);
        let text = self.read_markdown(uri)?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(MARKDOWN_MIME_TYPE.to_string()),
                text,
                meta: None,
            }],
        })
    }

    fn render_all(&self) -> String {
        self.catalog
            .functions()
            .values()
            .map(|entry| format_help(entry.name(), entry.doc(), 2))
            .collect::<Vec<_>>()
            .join(DIVIDER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::CatalogConfig;
    use crate::domains::catalog::{FunctionEntry, discover_from};
    use tokio_test::assert_ok;

    fn service() -> ResourceService {
        let catalog = Catalog::initialize(&CatalogConfig::default());
        ResourceService::new(Arc::new(catalog))
    }

    #[test]
    fn test_list_resources_one_per_function_plus_aggregate() {
        let service = service();
        let resources = service.list_resources();
        assert_eq!(resources.len(), 17);

        let uris: Vec<&str> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert_eq!(uris.last(), Some(&"fi://help/all"));
        assert!(uris.contains(&"fi://help/future_value"));

        let names: Vec<&str> = uris[..16].to_vec();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_read_single_function() {
        let service = service();
        let text = assert_ok!(service.read_markdown("fi://help/fi_number"));
        assert!(text.starts_with("# FI Number\n\n"));
        assert!(text.contains("### Args:"));
    }

    #[test]
    fn test_read_aggregate_in_name_order() {
        let service = service();
        let text = assert_ok!(service.read_markdown("fi://help/all"));
        let blocks: Vec<&str> = text.split(DIVIDER).collect();
        assert_eq!(blocks.len(), 16);
        assert!(blocks.iter().all(|block| block.starts_with("## ")));

        let annual = text.find("## Annual Cost").unwrap_or(usize::MAX);
        let pot = text.find("## POT Score").unwrap_or(usize::MAX);
        let fv = text.find("## Future Value").unwrap_or(usize::MAX);
        assert!(annual < fv && fv < pot && pot < usize::MAX);
        assert_eq!(text.matches("## Future Value").count(), 1);
    }

    #[test]
    fn test_read_resource_wraps_markdown() {
        let service = service();
        let result = assert_ok!(service.read_resource("fi://help/pot_score"));
        assert_eq!(result.contents.len(), 1);
        match &result.contents[0] {
            ResourceContents::TextResourceContents {
                uri,
                mime_type,
                text,
                ..
            } => {
                assert_eq!(uri, "fi://help/pot_score");
                assert_eq!(mime_type.as_deref(), Some("text/markdown"));
                assert!(text.starts_with("# POT Score"));
            }
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_function() {
        let service = service();
        assert_eq!(
            service.read_markdown("fi://help/nope"),
            Err(ResourceError::NotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_invalid_uri() {
        let service = service();
        assert_eq!(
            service.read_markdown("file:///etc/passwd"),
            Err(ResourceError::InvalidUri("file:///etc/passwd".to_string()))
        );
        assert!(service.read_markdown("fi://other/future_value").is_err());
    }

    #[test]
    fn test_undocumented_function_gets_placeholder() {
        let entry = FunctionEntry::new("bare", "", vec![], |_| Ok(String::new()));
        let catalog = Catalog::from_registry(&CatalogConfig::default(), discover_from([entry]));
        let service = ResourceService::new(Arc::new(catalog));

        let text = assert_ok!(service.read_markdown("fi://help/bare"));
        assert_eq!(text, "# Bare\n\nNo documentation available.");
        assert_eq!(service.list_resources().len(), 2);
    }
}
