//! Resource Registry - URIs and metadata of documentation resources.
//!
//! One resource per function at `<scheme>://help/<function_name>`, one
//! aggregate at `<scheme>://help/all`, and one URI template describing the
//! per-function form.

use rmcp::model::{AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceTemplate};

/// MIME type of every documentation resource.
pub const MARKDOWN_MIME_TYPE: &str = "text/markdown";

/// Final path segment of the aggregate resource.
pub const AGGREGATE_NAME: &str = "all";

/// `<scheme>://help/`.
pub fn help_prefix(scheme: &str) -> String {
    format!("{scheme}://help/")
}

/// `<scheme>://help/<name>`.
pub fn help_uri(scheme: &str, name: &str) -> String {
    format!("{}{}", help_prefix(scheme), name)
}

/// Helper function to create an annotated markdown resource.
fn build_resource(uri: String, name: String, description: String) -> Resource {
    let mut raw = RawResource::new(uri, name);
    raw.description = Some(description);
    raw.mime_type = Some(MARKDOWN_MIME_TYPE.to_string());
    raw.no_annotation()
}

/// The help resource of one function.
pub fn function_resource(scheme: &str, function_name: &str) -> Resource {
    build_resource(
        help_uri(scheme, function_name),
        format!("Help: {function_name}"),
        format!("Documentation for the {function_name} function"),
    )
}

/// The aggregate help resource.
pub fn aggregate_resource(scheme: &str) -> Resource {
    build_resource(
        help_uri(scheme, AGGREGATE_NAME),
        "Help: All Functions".to_string(),
        "Documentation for all FI functions".to_string(),
    )
}

/// Resource templates use URI templates (RFC 6570) to describe
/// parameterized resources that clients can fill in.
pub fn resource_templates(scheme: &str) -> Vec<ResourceTemplate> {
    vec![
        RawResourceTemplate {
            uri_template: format!("{}{{function_name}}", help_prefix(scheme)),
            name: "Function Help".to_string(),
            title: Some("FI Function Documentation".to_string()),
            description: Some(
                "Documentation for one FI function, by function name".to_string(),
            ),
            mime_type: Some(MARKDOWN_MIME_TYPE.to_string()),
        }
        .no_annotation(),
    ]
}
