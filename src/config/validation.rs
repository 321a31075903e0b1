//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the bind address parses as a socket address
//! - Validate value ranges (upstream port nonzero)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ProxyConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug)]
pub enum ValidationError {
    /// The listener bind address is not a valid socket address.
    InvalidBindAddress(String),
    /// The upstream destination port is zero.
    ZeroUpstreamPort,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "invalid bind address '{}'", addr)
            }
            ValidationError::ZeroUpstreamPort => write!(f, "upstream port must be nonzero"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.upstream.port == 0 {
        errors.push(ValidationError::ZeroUpstreamPort);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
