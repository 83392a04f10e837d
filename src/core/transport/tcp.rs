//! TCP transport implementation.
//!
//! Line-delimited JSON-RPC over raw TCP. Every accepted connection runs its
//! own MCP session on a separate task; all sessions share one catalog.

use std::net::SocketAddr;
use std::time::Duration;

use rmcp::ServiceExt;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use super::{TransportError, TransportResult, config::TcpConfig};
use crate::core::McpServer;

/// Pause after a failed `accept` before retrying.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    /// Create a new TCP transport with the given config.
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Accept connections until the process stops. Returns only on bind failure.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - serving {} FI tools on {} (JSON-RPC over TCP)",
            server.catalog().schemas().len(),
            addr
        );

        let mut sessions: u64 = 0;
        loop {
            let (stream, peer) = match listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                    tokio::time::sleep(ACCEPT_BACKOFF).await;
                    continue;
                }
            };

            sessions += 1;
            if let Err(e) = stream.set_nodelay(true) {
                debug!("Could not set TCP_NODELAY for {}: {}", peer, e);
            }
            tokio::spawn(serve_session(server.clone(), stream, peer, sessions));
        }
    }
}

/// Run one MCP session to completion.
async fn serve_session(server: McpServer, stream: TcpStream, peer: SocketAddr, session: u64) {
    info!("Session {} opened by {}", session, peer);

    let running = match server.serve(stream).await {
        Ok(running) => running,
        Err(e) => {
            warn!("Session {} handshake with {} failed: {}", session, peer, e);
            return;
        }
    };

    match running.waiting().await {
        Ok(reason) => info!("Session {} closed ({:?})", session, reason),
        Err(e) => warn!("Session {} with {} ended with error: {:?}", session, peer, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;

    #[tokio::test]
    async fn test_run_reports_bind_failure() {
        let occupied = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = occupied.local_addr().unwrap().port();

        let transport = TcpTransport::new(TcpConfig {
            host: "127.0.0.1".to_string(),
            port,
        });
        let result = transport.run(McpServer::new(Config::default())).await;

        match result {
            Err(TransportError::BindError { address, .. }) => {
                assert_eq!(address, format!("127.0.0.1:{port}"));
            }
            other => panic!("expected bind failure, got {other:?}"),
        }
    }
}
