//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults so the proxy runs with no config file at all
//! - Buffer capacities are build-time constants, not configuration

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ProxyConfig, UpstreamConfig};

/// Capacity of the per-connection header capture buffer. Request headers
/// running past this are truncated here, not rejected.
pub const HEADER_BUFFER_SIZE: usize = 4096;

/// Longest stored host value in bytes; anything longer is silently cut.
/// DNS names cannot legitimately exceed this.
pub const HOST_MAX_LEN: usize = 255;

/// Chunk size for the upstream-to-client response relay.
pub const RELAY_CHUNK_SIZE: usize = 4096;
