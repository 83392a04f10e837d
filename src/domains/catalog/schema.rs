//! Schema Generator - turns registered functions into tool schemas.
//!
//! Each function's parameters and parsed documentation become a JSON
//! Schema object with one property per parameter, the required list, and
//! `additionalProperties: false`.

use std::collections::BTreeMap;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};
use tracing::error;

use super::docs::{ParsedDoc, collapse_whitespace};
use super::error::SchemaError;
use super::registry::{FunctionEntry, Registry};
use super::types::TypeDescriptor;

/// Maps function names to tool names and back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolNaming {
    prefix: String,
}

impl ToolNaming {
    /// Create a naming convention with the given prefix (without separator).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The prefix, without separator.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `<prefix>_<function_name>`.
    pub fn tool_name(&self, function_name: &str) -> String {
        format!("{}_{}", self.prefix, function_name)
    }

    /// Recover the function name from a tool name, if the prefix matches.
    pub fn function_name<'a>(&self, tool_name: &'a str) -> Option<&'a str> {
        tool_name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('_')
            .filter(|name| !name.is_empty())
    }
}

/// Schema of one tool property.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySchema {
    /// Parameter name.
    pub name: String,

    /// JSON Schema for the property, including its description.
    pub schema: JsonObject,
}

impl PropertySchema {
    /// The JSON Schema `type` keyword.
    pub fn json_type(&self) -> Option<&str> {
        self.schema.get("type").and_then(Value::as_str)
    }

    /// Allowed values, for enumerated-literal parameters.
    pub fn enum_values(&self) -> Option<Vec<&str>> {
        self.schema
            .get("enum")
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
    }
}

/// The published schema of one tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSchema {
    /// `<prefix>_<function_name>`.
    pub name: String,

    /// Whitespace-normalized description paragraph.
    pub description: String,

    /// Properties in parameter declaration order.
    pub properties: Vec<PropertySchema>,

    /// Names of parameters without defaults, in declaration order.
    pub required: Vec<String>,
}

impl ToolSchema {
    /// Look up a property by parameter name.
    pub fn property(&self, name: &str) -> Option<&PropertySchema> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// The closed-world object schema published as `inputSchema`.
    pub fn input_schema(&self) -> JsonObject {
        let properties: JsonObject = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), Value::Object(p.schema.clone())))
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        schema.insert("required".into(), json!(self.required));
        schema.insert("additionalProperties".into(), json!(false));
        schema
    }

    /// The protocol projection of this schema.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// JSON Schema for a parameter type, without description.
///
/// Containers are matched before primitives by construction: the
/// descriptor is a tagged variant, not a type string.
pub fn type_schema(kind: &TypeDescriptor) -> JsonObject {
    let mut schema = JsonObject::new();
    match kind {
        TypeDescriptor::Sequence(item) => {
            schema.insert("type".into(), json!("array"));
            schema.insert("items".into(), Value::Object(item_schema(item)));
        }
        TypeDescriptor::Mapping(value) => {
            schema.insert("type".into(), json!("object"));
            schema.insert(
                "additionalProperties".into(),
                Value::Object(item_schema(value)),
            );
        }
        TypeDescriptor::Literal(values) => {
            schema.insert("type".into(), json!("string"));
            schema.insert("enum".into(), json!(values));
        }
        TypeDescriptor::Number => {
            schema.insert("type".into(), json!("number"));
        }
        TypeDescriptor::Integer => {
            schema.insert("type".into(), json!("integer"));
        }
        TypeDescriptor::Boolean => {
            schema.insert("type".into(), json!("boolean"));
        }
        TypeDescriptor::Text | TypeDescriptor::Opaque(_) => {
            schema.insert("type".into(), json!("string"));
        }
    }
    schema
}

/// Schema of a container's element. Numeric elements are published as `number`.
fn item_schema(kind: &TypeDescriptor) -> JsonObject {
    if kind.is_numeric() {
        let mut schema = JsonObject::new();
        schema.insert("type".into(), json!("number"));
        schema
    } else {
        type_schema(kind)
    }
}

/// Build the schema of one registered function.
///
/// Fails when the function has no documentation or its documentation has
/// no description paragraph.
pub fn build_schema(naming: &ToolNaming, entry: &FunctionEntry) -> Result<ToolSchema, SchemaError> {
    let doc = entry
        .doc()
        .ok_or_else(|| SchemaError::MissingDocumentation(entry.name().to_string()))?;

    let parsed = ParsedDoc::parse(Some(doc));
    if parsed.description.is_empty() {
        return Err(SchemaError::EmptyDescription(entry.name().to_string()));
    }

    let properties = entry
        .params()
        .iter()
        .map(|param| {
            let mut schema = type_schema(&param.kind);
            let description = parsed
                .param(param.name)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Parameter: {}", param.name));
            schema.insert("description".into(), json!(description));
            PropertySchema {
                name: param.name.to_string(),
                schema,
            }
        })
        .collect();

    let required = entry
        .params()
        .iter()
        .filter(|param| param.is_required())
        .map(|param| param.name.to_string())
        .collect();

    Ok(ToolSchema {
        name: naming.tool_name(entry.name()),
        description: collapse_whitespace(&parsed.description),
        properties,
        required,
    })
}

/// Build schemas for every registered function, keyed by tool name.
///
/// A function whose schema cannot be built is logged and left out.
pub fn build_all(naming: &ToolNaming, registry: &Registry) -> BTreeMap<String, ToolSchema> {
    registry
        .values()
        .filter_map(|entry| match build_schema(naming, entry) {
            Ok(schema) => Some((schema.name.clone(), schema)),
            Err(e) => {
                error!("Could not generate schema for {}: {}", entry.name(), e);
                None
            }
        })
        .collect()
}
