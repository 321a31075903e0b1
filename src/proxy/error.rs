//! Error types for the per-connection pipeline.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Canned response for requests whose headers could not be parsed.
const BAD_REQUEST: &[u8] = b"HTTP/1.0 400 Bad Request\r\n\r\nInvalid request";

/// Canned response when the destination host did not resolve.
const RESOLUTION_FAILED: &[u8] = b"HTTP/1.0 502 Bad Gateway\r\n\r\nHost resolution failed";

/// Canned response when the connection to the resolved address failed.
const CONNECT_FAILED: &[u8] = b"HTTP/1.0 502 Bad Gateway\r\n\r\nUpstream connection failed";

/// Failure modes of one connection worker.
///
/// Every variant is local to a single connection; none of them can affect
/// other workers or the accept loop.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The client closed before sending any bytes.
    #[error("client closed before sending any data")]
    EmptyRequest,

    /// No `Host: ` field was present in the captured headers.
    #[error("no Host field in request headers")]
    MissingHostHeader,

    /// A `Host: ` field was found but no line terminator follows it.
    #[error("unterminated Host line in request headers")]
    MalformedHeaders,

    /// The host name did not resolve to any IPv4 address.
    #[error("failed to resolve host {host}: {reason}")]
    ResolutionFailed { host: String, reason: String },

    /// The TCP connection to the resolved address could not be established.
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed { addr: SocketAddr, source: io::Error },

    /// Writing the captured request bytes to the upstream failed.
    #[error("failed to forward request upstream: {0}")]
    ForwardFailed(#[source] io::Error),
}

impl ProxyError {
    /// Fixed response written to the client before closing, if any.
    ///
    /// `EmptyRequest` and `ForwardFailed` close silently: in the first case
    /// there is nobody left to answer, in the second the upstream link is
    /// already broken and no meaningful status can be produced.
    pub fn wire_response(&self) -> Option<&'static [u8]> {
        match self {
            ProxyError::MissingHostHeader | ProxyError::MalformedHeaders => Some(BAD_REQUEST),
            ProxyError::ResolutionFailed { .. } => Some(RESOLUTION_FAILED),
            ProxyError::ConnectFailed { .. } => Some(CONNECT_FAILED),
            ProxyError::EmptyRequest | ProxyError::ForwardFailed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failures_map_to_400() {
        let resp = ProxyError::MissingHostHeader.wire_response().unwrap();
        assert!(resp.starts_with(b"HTTP/1.0 400"));

        let resp = ProxyError::MalformedHeaders.wire_response().unwrap();
        assert!(resp.starts_with(b"HTTP/1.0 400"));
    }

    #[test]
    fn upstream_failures_map_to_502() {
        let resp = ProxyError::ResolutionFailed {
            host: "example.com".into(),
            reason: "no addresses".into(),
        }
        .wire_response()
        .unwrap();
        assert!(resp.starts_with(b"HTTP/1.0 502"));

        let resp = ProxyError::ConnectFailed {
            addr: "127.0.0.1:80".parse().unwrap(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        }
        .wire_response()
        .unwrap();
        assert!(resp.starts_with(b"HTTP/1.0 502"));
    }

    #[test]
    fn silent_failures_have_no_response() {
        assert!(ProxyError::EmptyRequest.wire_response().is_none());

        let err = ProxyError::ForwardFailed(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(err.wire_response().is_none());
    }
}
