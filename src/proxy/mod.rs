//! Connection-handling pipeline.
//!
//! # Data Flow
//! ```text
//! Accepted TCP connection
//!     → server.rs  (accept loop, one detached worker per connection)
//!     → worker.rs  (sequential per-connection orchestration)
//!     → headers.rs (bounded header capture, Host extraction)
//!     → upstream.rs (resolve + connect, fixed destination port)
//!     → relay.rs   (forward captured request, pump response back)
//! ```
//!
//! # Design Decisions
//! - Workers are independent tasks with no shared mutable state
//! - Errors are local to one connection; the accept loop never sees them
//! - The response relay treats upstream EOF and link failure identically

pub mod error;
pub mod headers;
pub mod relay;
pub mod server;
pub mod upstream;
pub mod worker;

pub use error::ProxyError;
pub use server::ProxyServer;
