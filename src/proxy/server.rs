//! Accept loop and worker spawning.
//!
//! # Responsibilities
//! - Drive the listener's accept loop for the life of the process
//! - Spawn one detached worker task per accepted connection
//! - Log accept failures and keep going; nothing here is fatal

use crate::config::ProxyConfig;
use crate::net::connection::ConnectionTracker;
use crate::net::listener::Listener;
use crate::proxy::worker;

/// The proxy server: owns the accept loop.
pub struct ProxyServer {
    config: ProxyConfig,
    connections: ConnectionTracker,
}

impl ProxyServer {
    /// Create a server from a validated configuration.
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            config,
            connections: ConnectionTracker::new(),
        }
    }

    /// Run the accept loop until a shutdown signal arrives.
    ///
    /// Workers are fire-and-forget: nothing joins them, nothing bounds how
    /// many are in flight, and a worker's failure is invisible here. Accept
    /// errors are logged and the loop continues.
    pub async fn run(self, listener: Listener) {
        let upstream_port = self.config.upstream.port;

        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!(
                        active = self.connections.active_count(),
                        "Shutdown signal received"
                    );
                    return;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer_addr)) => {
                            let guard = self.connections.track();
                            tokio::spawn(async move {
                                worker::handle_connection(stream, peer_addr, upstream_port, guard)
                                    .await;
                            });
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "Accept failed, continuing");
                        }
                    }
                }
            }
        }
    }
}
