//! Outbound connection establishment.
//!
//! # Responsibilities
//! - Resolve the extracted host name to an IPv4 address
//! - Open the TCP connection the request bytes will be forwarded over
//!
//! # Design Decisions
//! - Only the first resolved address is tried; there is no fallback across
//!   multiple A records
//! - The destination port is always the proxy's configured value; any port
//!   the client put in its request is ignored

use std::net::SocketAddr;
use tokio::net::{lookup_host, TcpStream};

use crate::proxy::error::ProxyError;

/// Resolve `host` and connect to the first IPv4 address it yields on `port`.
pub async fn connect_upstream(host: &str, port: u16) -> Result<TcpStream, ProxyError> {
    let mut addrs = lookup_host((host, port))
        .await
        .map_err(|e| ProxyError::ResolutionFailed {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    let addr = addrs
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| ProxyError::ResolutionFailed {
            host: host.to_string(),
            reason: "no IPv4 address".to_string(),
        })?;

    tracing::debug!(host, addr = %addr, "Connecting upstream");

    TcpStream::connect(addr)
        .await
        .map_err(|source| ProxyError::ConnectFailed { addr, source })
}
