//! Transport selection and listen addresses.
//!
//! `MCP_TRANSPORT` picks the transport (`stdio` when unset); the network
//! transports read their address from `MCP_TCP_*` or `MCP_HTTP_*`. A
//! transport that was not compiled in, or a malformed port or flag, is a
//! startup error rather than a silent fallback.

use serde::{Deserialize, Serialize};

use super::{TransportError, TransportResult};

#[cfg(any(feature = "tcp", feature = "http"))]
const DEFAULT_HOST: &str = "127.0.0.1";

#[cfg(feature = "tcp")]
const DEFAULT_TCP_PORT: u16 = 3000;

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 8080;

#[cfg(feature = "http")]
const DEFAULT_RPC_PATH: &str = "/mcp";

/// Which transport carries the MCP session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Line-delimited JSON-RPC on stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// One MCP session per TCP connection.
    #[cfg(feature = "tcp")]
    Tcp(TcpConfig),

    /// Stateless JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// Where the TCP transport listens.
#[cfg(feature = "tcp")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcpConfig {
    pub host: String,
    pub port: u16,
}

/// Where the HTTP transport listens and how it is exposed.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,

    /// Path of the JSON-RPC endpoint.
    pub rpc_path: String,

    /// Allow any origin, for browser clients.
    pub enable_cors: bool,
}

#[cfg(feature = "tcp")]
impl Default for TcpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_TCP_PORT,
        }
    }
}

#[cfg(feature = "tcp")]
impl TcpConfig {
    fn from_env() -> TransportResult<Self> {
        Ok(Self {
            host: env_or("MCP_TCP_HOST", DEFAULT_HOST),
            port: env_port("MCP_TCP_PORT", DEFAULT_TCP_PORT)?,
        })
    }

    /// `host:port` to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            rpc_path: DEFAULT_RPC_PATH.to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    fn from_env() -> TransportResult<Self> {
        let rpc_path = env_or("MCP_HTTP_PATH", DEFAULT_RPC_PATH);
        if !rpc_path.starts_with('/') {
            return Err(TransportError::invalid_setting(
                "MCP_HTTP_PATH",
                rpc_path,
                "must start with '/'",
            ));
        }
        Ok(Self {
            host: env_or("MCP_HTTP_HOST", DEFAULT_HOST),
            port: env_port("MCP_HTTP_PORT", DEFAULT_HTTP_PORT)?,
            rpc_path,
            enable_cors: env_flag("MCP_HTTP_CORS", true)?,
        })
    }

    /// `host:port` to bind.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "stdio")]
        {
            Self::Stdio
        }

        #[cfg(all(not(feature = "stdio"), feature = "tcp"))]
        {
            Self::Tcp(TcpConfig::default())
        }

        #[cfg(all(not(feature = "stdio"), not(feature = "tcp"), feature = "http"))]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(not(any(feature = "stdio", feature = "tcp", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio, tcp, or http");
        }
    }
}

impl TransportConfig {
    /// Read the transport selection from the environment.
    pub fn from_env() -> TransportResult<Self> {
        let selected = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        match selected.as_str() {
            "" => Ok(Self::default()),
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            #[cfg(feature = "tcp")]
            "tcp" => Ok(Self::Tcp(TcpConfig::from_env()?)),
            #[cfg(feature = "http")]
            "http" => Ok(Self::Http(HttpConfig::from_env()?)),
            _ => Err(TransportError::invalid_setting(
                "MCP_TRANSPORT",
                selected.clone(),
                format!("expected one of: {}", enabled_transports().join(", ")),
            )),
        }
    }

    /// Human-readable summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "tcp")]
            Self::Tcp(cfg) => format!("TCP on {}", cfg.address()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}{}", cfg.address(), cfg.rpc_path),
        }
    }
}

/// Transports compiled into this binary.
fn enabled_transports() -> Vec<&'static str> {
    [
        (cfg!(feature = "stdio"), "stdio"),
        (cfg!(feature = "tcp"), "tcp"),
        (cfg!(feature = "http"), "http"),
    ]
    .into_iter()
    .filter_map(|(enabled, name)| enabled.then_some(name))
    .collect()
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(any(feature = "tcp", feature = "http"))]
fn env_port(key: &str, default: u16) -> TransportResult<u16> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| TransportError::invalid_setting(key, raw.clone(), "not a port number")),
        Err(_) => Ok(default),
    }
}

#[cfg(feature = "http")]
fn env_flag(key: &str, default: bool) -> TransportResult<bool> {
    let Ok(raw) = std::env::var(key) else {
        return Ok(default);
    };
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(TransportError::invalid_setting(key, raw, "not a boolean")),
    }
}
