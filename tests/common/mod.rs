//! Shared utilities for integration testing.

use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Read from `socket` until the header terminator shows up, `min_bytes` have
/// accumulated, or the peer goes away.
async fn read_request(socket: &mut TcpStream, min_bytes: usize) -> Vec<u8> {
    let mut received = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => {
                received.extend_from_slice(&buf[..n]);
                let terminated = received
                    .windows(HEADER_TERMINATOR.len())
                    .any(|w| w == HEADER_TERMINATOR);
                if terminated || received.len() >= min_bytes {
                    break;
                }
            }
        }
    }

    received
}

/// Start a mock upstream that replies to every connection with a fixed
/// response and then closes.
pub async fn start_mock_upstream(response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request(&mut socket, usize::MAX).await;
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock upstream that captures what each connection sends (up to the
/// header terminator or `min_bytes`, whichever comes first) before replying.
#[allow(dead_code)]
pub async fn start_capturing_upstream(
    response: &'static str,
    min_bytes: usize,
) -> (SocketAddr, mpsc::UnboundedReceiver<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let received = read_request(&mut socket, min_bytes).await;
                        let _ = tx.send(received);
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, rx)
}

/// Start a mock upstream that echoes each connection's captured request back
/// as the body of a 200 response.
#[allow(dead_code)]
pub async fn start_echo_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let received = read_request(&mut socket, usize::MAX).await;
                        let head = format!(
                            "HTTP/1.0 200 OK\r\nContent-Length: {}\r\n\r\n",
                            received.len()
                        );
                        let _ = socket.write_all(head.as_bytes()).await;
                        let _ = socket.write_all(&received).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
