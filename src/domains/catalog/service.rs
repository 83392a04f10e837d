//! The immutable tool catalog built once at startup.
//!
//! The catalog owns the discovered functions and their generated schemas.
//! It is shared behind an `Arc` and never mutated after construction, so
//! request handlers read it without locking.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use super::registry::{FunctionEntry, Registry, discover};
use super::schema::{ToolNaming, ToolSchema, build_all};
use crate::core::config::CatalogConfig;

/// Per-tool figures logged at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSummary {
    pub description: String,
    pub parameter_count: usize,
    pub required_parameters: usize,
}

/// Discovered functions plus their published tool schemas.
#[derive(Debug)]
pub struct Catalog {
    naming: ToolNaming,
    resource_scheme: String,
    functions: Registry,
    schemas: BTreeMap<String, ToolSchema>,
}

impl Catalog {
    /// Discover the calculation library and build every tool schema.
    pub fn initialize(config: &CatalogConfig) -> Self {
        info!("Initializing FI catalog...");
        let catalog = Self::from_registry(config, discover());
        info!("FI catalog initialization complete");
        catalog
    }

    /// Build a catalog over an already-discovered registry.
    pub fn from_registry(config: &CatalogConfig, functions: Registry) -> Self {
        info!("Discovered {} FI functions", functions.len());

        let naming = ToolNaming::new(config.tool_prefix.clone());
        let schemas = build_all(&naming, &functions);
        info!("Generated {} tool schemas", schemas.len());

        let catalog = Self {
            naming,
            resource_scheme: config.resource_scheme.clone(),
            functions,
            schemas,
        };

        for (tool_name, summary) in catalog.summary() {
            debug!(
                "Tool: {} - {} params ({} required)",
                tool_name, summary.parameter_count, summary.required_parameters
            );
        }

        catalog
    }

    /// The tool naming convention.
    pub fn naming(&self) -> &ToolNaming {
        &self.naming
    }

    /// URI scheme of documentation resources.
    pub fn resource_scheme(&self) -> &str {
        &self.resource_scheme
    }

    /// Every discovered function, sorted by name.
    pub fn functions(&self) -> &Registry {
        &self.functions
    }

    /// Look up a function by name.
    pub fn function(&self, name: &str) -> Option<&FunctionEntry> {
        self.functions.get(name)
    }

    /// Every published schema, sorted by tool name.
    pub fn schemas(&self) -> &BTreeMap<String, ToolSchema> {
        &self.schemas
    }

    /// Look up a schema by tool name.
    pub fn schema(&self, tool_name: &str) -> Option<&ToolSchema> {
        self.schemas.get(tool_name)
    }

    /// Description and parameter counts of every published tool.
    pub fn summary(&self) -> BTreeMap<String, ToolSummary> {
        self.schemas
            .iter()
            .map(|(name, schema)| {
                let summary = ToolSummary {
                    description: schema.description.clone(),
                    parameter_count: schema.properties.len(),
                    required_parameters: schema.required.len(),
                };
                (name.clone(), summary)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::registry::{FunctionEntry, discover_from};

    #[test]
    fn test_initialize_publishes_every_function() {
        let catalog = Catalog::initialize(&CatalogConfig::default());
        assert!(!catalog.functions().is_empty());
        assert_eq!(catalog.schemas().len(), catalog.functions().len());
        assert_eq!(catalog.resource_scheme(), "fi");

        let tool_names: Vec<String> = catalog
            .functions()
            .keys()
            .map(|name| catalog.naming().tool_name(name))
            .collect();
        let schema_names: Vec<String> = catalog.schemas().keys().cloned().collect();
        assert_eq!(tool_names, schema_names);
    }

    #[test]
    fn test_summary_counts() {
        let catalog = Catalog::initialize(&CatalogConfig::default());
        let summaries = catalog.summary();
        let summary = &summaries["fi_future_value"];
        assert_eq!(summary.parameter_count, 4);
        assert_eq!(summary.required_parameters, 2);
        assert!(!summary.description.is_empty());
    }

    #[test]
    fn test_empty_registry_yields_empty_catalog() {
        let catalog = Catalog::from_registry(&CatalogConfig::default(), discover_from([]));
        assert!(catalog.functions().is_empty());
        assert!(catalog.schemas().is_empty());
    }

    #[test]
    fn test_custom_prefix() {
        let config = CatalogConfig {
            tool_prefix: "calc".into(),
            ..CatalogConfig::default()
        };
        let registry = discover_from([FunctionEntry::new(
            "double",
            "Double a number.",
            vec![],
            |_| Ok(String::new()),
        )]);
        let catalog = Catalog::from_registry(&config, registry);
        assert!(catalog.schema("calc_double").is_some());
        assert!(catalog.function("double").is_some());
    }
}
