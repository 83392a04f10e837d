//! FI MCP Server Entry Point
//!
//! Initializes logging, loads configuration, publishes the calculation
//! catalog and serves it over the configured transport.

use anyhow::Result;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, fmt};

use fi_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone());
    log_summary(&server);

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Log the published tools and their parameter counts.
fn log_summary(server: &McpServer) {
    let summary = server.summary();
    info!(
        "Catalog ready: {} tools from {} functions",
        summary.len(),
        server.catalog().functions().len()
    );
    for (tool, entry) in &summary {
        debug!(
            "  {} ({} params, {} required): {}",
            tool, entry.parameter_count, entry.required_parameters, entry.description
        );
    }
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
