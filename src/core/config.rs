//! Configuration management for the FI MCP server.
//!
//! Values come from defaults, overridden by `MCP_*` environment variables
//! (optionally loaded from a `.env` file).

use super::error::{Error, Result};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default prefix of every published tool name.
pub const DEFAULT_TOOL_PREFIX: &str = "fi";

/// Default URI scheme of the documentation resources.
pub const DEFAULT_RESOURCE_SCHEME: &str = "fi";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tool naming and documentation addressing.
    pub catalog: CatalogConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// How the catalog names tools and addresses documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Tool names are `<tool_prefix>_<function_name>`.
    pub tool_prefix: String,

    /// Help resources live under `<resource_scheme>://help/`.
    pub resource_scheme: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "fi-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tool_prefix: DEFAULT_TOOL_PREFIX.to_string(),
            resource_scheme: DEFAULT_RESOURCE_SCHEME.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_TOOL_PREFIX`,
    /// `MCP_RESOURCE_SCHEME` and the transport variables. A tool prefix or
    /// resource scheme that cannot appear in a tool name or URI is rejected.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(prefix) = non_blank_var("MCP_TOOL_PREFIX") {
            config.catalog.tool_prefix = valid_tool_prefix(prefix)?;
        }

        if let Some(scheme) = non_blank_var("MCP_RESOURCE_SCHEME") {
            config.catalog.resource_scheme = valid_resource_scheme(scheme)?;
        }

        config.transport = TransportConfig::from_env()?;

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }
}

/// Read an environment variable, ignoring blank values.
fn non_blank_var(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let value = value.trim();
    if value.is_empty() {
        warn!("{} is blank, using default", key);
        return None;
    }
    Some(value.to_string())
}

/// Tool names allow ASCII letters, digits, `_` and `-`.
fn valid_tool_prefix(prefix: String) -> Result<String> {
    if prefix
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        Ok(prefix)
    } else {
        Err(Error::config(format!(
            "MCP_TOOL_PREFIX={prefix:?} may only contain ASCII letters, digits, '_' and '-'"
        )))
    }
}

/// URI schemes start with a letter, then letters, digits, `+`, `-` or `.`.
fn valid_resource_scheme(scheme: String) -> Result<String> {
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if valid {
        Ok(scheme)
    } else {
        Err(Error::config(format!(
            "MCP_RESOURCE_SCHEME={scheme:?} is not a valid URI scheme"
        )))
    }
}

/// Serializes tests that touch process environment variables.
#[cfg(test)]
pub(crate) fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_ok;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "fi-mcp");
        assert_eq!(config.catalog.tool_prefix, "fi");
        assert_eq!(config.catalog.resource_scheme, "fi");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_catalog_from_env() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("MCP_TOOL_PREFIX", "money");
            std::env::set_var("MCP_RESOURCE_SCHEME", "docs");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_TOOL_PREFIX");
            std::env::remove_var("MCP_RESOURCE_SCHEME");
        }
        let config = assert_ok!(config);
        assert_eq!(config.catalog.tool_prefix, "money");
        assert_eq!(config.catalog.resource_scheme, "docs");
    }

    #[test]
    fn test_blank_prefix_falls_back_to_default() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("MCP_TOOL_PREFIX", "   ");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_TOOL_PREFIX");
        }
        assert_eq!(assert_ok!(config).catalog.tool_prefix, DEFAULT_TOOL_PREFIX);
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "fi-test");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
        assert_eq!(assert_ok!(config).server.name, "fi-test");
    }

    #[test]
    fn test_unusable_prefix_is_rejected() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("MCP_TOOL_PREFIX", "my tools");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_TOOL_PREFIX");
        }
        let err = result.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("MCP_TOOL_PREFIX"));
    }

    #[test]
    fn test_resource_scheme_syntax() {
        assert_ok!(valid_resource_scheme("fi".to_string()));
        assert_ok!(valid_resource_scheme("x-fi.v2+docs".to_string()));
        assert!(valid_resource_scheme("2fi".to_string()).is_err());
        assert!(valid_resource_scheme("fi:help".to_string()).is_err());
    }

    #[test]
    fn test_bad_transport_fails_startup() {
        let _lock = lock_env();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "smtp");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
