//! Request forwarding and response relay.
//!
//! The forwarder pushes the already-captured request bytes upstream exactly
//! once; the relay then pumps response bytes back to the client one chunk at
//! a time until the upstream goes away.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::RELAY_CHUNK_SIZE;
use crate::proxy::error::ProxyError;

/// Write the captured request bytes to the upstream in their entirety.
///
/// Partial writes are retried by `write_all`; any error stops the transfer
/// with no further writes.
pub async fn forward_request<W>(upstream: &mut W, request: &[u8]) -> Result<(), ProxyError>
where
    W: AsyncWrite + Unpin,
{
    upstream
        .write_all(request)
        .await
        .map_err(ProxyError::ForwardFailed)
}

/// Copy response bytes from the upstream to the client until the upstream
/// reaches end-of-stream or either side fails.
///
/// Termination is silent on every path: a clean upstream close and a broken
/// link end the loop the same way, and a failed client write is not retried.
pub async fn relay_response<R, W>(upstream: &mut R, client: &mut W)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut chunk = [0u8; RELAY_CHUNK_SIZE];

    loop {
        let n = match upstream.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };

        if client.write_all(&chunk[..n]).await.is_err() {
            break;
        }
    }
}
