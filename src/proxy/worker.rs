//! Per-connection orchestration.
//!
//! # Data Flow
//! ```text
//! Client connection
//!     → headers.rs  capture raw request bytes (bounded)
//!     → headers.rs  extract destination host
//!     → upstream.rs resolve + connect on the fixed port
//!     → relay.rs    forward captured bytes, then pump the response back
//!     → both streams dropped
//! ```
//!
//! Each step either advances the pipeline or ends it; there is no
//! backtracking and no retry. On a parse failure the client gets a fixed 400,
//! on a resolution or connect failure a fixed 502, and on everything else the
//! connection is simply closed.

use std::net::SocketAddr;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::HEADER_BUFFER_SIZE;
use crate::net::connection::ConnectionGuard;
use crate::proxy::error::ProxyError;
use crate::proxy::headers::{extract_host, read_headers};
use crate::proxy::relay::{forward_request, relay_response};
use crate::proxy::upstream::connect_upstream;

/// Handle one client connection end to end.
///
/// Owns the client stream and, once connected, the upstream stream; both are
/// dropped on every exit path. Errors never escape: whatever wire response
/// the failure calls for is written here, then the worker ends.
pub async fn handle_connection(
    mut client: TcpStream,
    peer_addr: SocketAddr,
    upstream_port: u16,
    guard: ConnectionGuard,
) {
    let id = guard.id();

    match run_pipeline(&mut client, upstream_port).await {
        Ok(()) => {
            tracing::debug!(connection_id = %id, peer_addr = %peer_addr, "Relay finished");
        }
        Err(err) => {
            if let Some(response) = err.wire_response() {
                // Best effort: the client may already be gone.
                let _ = client.write_all(response).await;
            }
            tracing::warn!(
                connection_id = %id,
                peer_addr = %peer_addr,
                error = %err,
                "Connection closed on error"
            );
        }
    }
}

async fn run_pipeline(client: &mut TcpStream, upstream_port: u16) -> Result<(), ProxyError> {
    let mut headers = [0u8; HEADER_BUFFER_SIZE];
    let captured = read_headers(client, &mut headers).await?;

    let host = extract_host(&headers[..captured])?;

    let mut upstream = connect_upstream(&host, upstream_port).await?;

    forward_request(&mut upstream, &headers[..captured]).await?;
    relay_response(&mut upstream, client).await;

    Ok(())
}
