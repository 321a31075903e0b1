//! Minimal forwarding proxy for plaintext HTTP/1.x traffic.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │               FORWARDING PROXY               │
//!                    │                                              │
//!   Client Request   │  ┌──────────┐   ┌─────────┐   ┌──────────┐  │
//!   ─────────────────┼─▶│   net    │──▶│ headers │──▶│ upstream │──┼──▶ Origin
//!                    │  │ listener │   │ capture │   │ connect  │  │    Server
//!                    │  └──────────┘   └─────────┘   └──────────┘  │
//!                    │                                     │       │
//!   Client Response  │  ┌──────────────────────────┐       │       │
//!   ◀────────────────┼──│   relay (chunked copy)   │◀──────┘       │
//!                    │  └──────────────────────────┘               │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! One worker task per accepted connection, no shared mutable state between
//! workers, no timeouts, no keep-alive. The proxy reads just enough of the
//! request to find the `Host:` field, connects to that host on a fixed port,
//! forwards the captured bytes, and streams the response back until the
//! upstream closes.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forward_proxy::config::{self, ProxyConfig};
use forward_proxy::net::Listener;
use forward_proxy::ProxyServer;

#[derive(Parser)]
#[command(name = "forward-proxy")]
#[command(about = "Minimal forwarding proxy for plaintext HTTP/1.x", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Built-in defaults apply when absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forward_proxy=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("forward-proxy v0.1.0 starting");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => config::load_config(&path)?,
        None => ProxyConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_port = config.upstream.port,
        "Configuration loaded"
    );

    let listener = Listener::bind(&config.listener).await?;

    let server = ProxyServer::new(config);
    server.run(listener).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
