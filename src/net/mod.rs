//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept loop feed)
//!     → connection.rs (ID assignment, in-flight accounting)
//!     → Hand off to the proxy pipeline
//! ```
//!
//! # Design Decisions
//! - No cap on accepted connections; every accept spawns a worker
//! - Connection tracking is observational only, never supervisory

pub mod connection;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionId, ConnectionTracker};
pub use listener::{Listener, ListenerError};
