//! Bounded header capture and Host extraction.
//!
//! # Responsibilities
//! - Read raw bytes off the client until the end-of-headers terminator, the
//!   buffer is full, or the peer closes
//! - Pull the destination host name out of the captured bytes
//!
//! # Design Decisions
//! - Oversized headers are truncated at the buffer capacity, never rejected;
//!   extraction operates on whatever was captured
//! - `Host: ` is matched exactly (case-sensitive, single space), not via a
//!   general header parser
//! - The extracted value is trimmed of spaces/tabs and silently truncated to
//!   [`HOST_MAX_LEN`]

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::HOST_MAX_LEN;
use crate::proxy::error::ProxyError;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const HOST_PREFIX: &[u8] = b"Host: ";
const LINE_TERMINATOR: &[u8] = b"\r\n";

/// Read request bytes into `buf` until the header terminator appears, the
/// buffer is full, or the peer closes. Returns the number of bytes captured.
///
/// A peer that closes without sending anything is a [`ProxyError::EmptyRequest`];
/// a read failure after at least one successful read is not fatal and the
/// bytes captured so far are returned.
pub async fn read_headers<S>(stream: &mut S, buf: &mut [u8]) -> Result<usize, ProxyError>
where
    S: AsyncRead + Unpin,
{
    let mut filled = 0;

    while filled < buf.len() {
        match stream.read(&mut buf[filled..]).await {
            Ok(0) if filled == 0 => return Err(ProxyError::EmptyRequest),
            Ok(0) => break,
            Ok(n) => {
                filled += n;
                if find(&buf[..filled], HEADER_TERMINATOR).is_some() {
                    break;
                }
            }
            Err(_) if filled == 0 => return Err(ProxyError::EmptyRequest),
            Err(_) => break,
        }
    }

    Ok(filled)
}

/// Extract the value of the `Host: ` field from the captured header bytes.
///
/// The value runs from just past the field prefix to the next line
/// terminator, is trimmed of surrounding spaces and tabs, and is truncated
/// to [`HOST_MAX_LEN`] bytes if longer.
pub fn extract_host(headers: &[u8]) -> Result<String, ProxyError> {
    let start = find(headers, HOST_PREFIX).ok_or(ProxyError::MissingHostHeader)? + HOST_PREFIX.len();

    let rest = &headers[start..];
    let end = find(rest, LINE_TERMINATOR).ok_or(ProxyError::MalformedHeaders)?;

    let mut value = String::from_utf8_lossy(trim_blanks(&rest[..end])).into_owned();
    if value.len() > HOST_MAX_LEN {
        // Cut on a char boundary so the result stays valid UTF-8.
        let mut cut = HOST_MAX_LEN;
        while !value.is_char_boundary(cut) {
            cut -= 1;
        }
        value.truncate(cut);
    }

    Ok(value)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}

fn trim_blanks(mut bytes: &[u8]) -> &[u8] {
    while let Some((&b, rest)) = bytes.split_first() {
        if b != b' ' && b != b'\t' {
            break;
        }
        bytes = rest;
    }
    while let Some((&b, rest)) = bytes.split_last() {
        if b != b' ' && b != b'\t' {
            break;
        }
        bytes = rest;
    }
    bytes
}
