//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, pool size > 0, header limit)
//! - Check the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::{AppConfig, StorageBackend, MIN_HEADER_BYTES};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    #[error("listener.max_connections must be greater than zero")]
    MaxConnections,

    #[error("database.url is required for the postgres backend")]
    DatabaseUrl,

    #[error("database.max_connections must be greater than zero")]
    PoolSize,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("limits.max_header_bytes must be at least {min}, got {actual}")]
    HeaderLimit { min: usize, actual: usize },

    #[error("limits.max_body_bytes must be greater than zero")]
    BodyLimit,
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::MaxConnections);
    }

    if config.database.backend == StorageBackend::Postgres {
        if config.database.url.trim().is_empty() {
            errors.push(ValidationError::DatabaseUrl);
        }
        if config.database.max_connections == 0 {
            errors.push(ValidationError::PoolSize);
        }
        if config.database.acquire_timeout_secs == 0 {
            errors.push(ValidationError::ZeroTimeout("database.acquire_timeout_secs"));
        }
    }

    let timeouts = [
        ("timeouts.read_secs", config.timeouts.read_secs),
        ("timeouts.write_secs", config.timeouts.write_secs),
        ("timeouts.shutdown_secs", config.timeouts.shutdown_secs),
    ];
    for (name, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::ZeroTimeout(name));
        }
    }

    if config.limits.max_header_bytes < MIN_HEADER_BYTES {
        errors.push(ValidationError::HeaderLimit {
            min: MIN_HEADER_BYTES,
            actual: config.limits.max_header_bytes,
        });
    }
    if config.limits.max_body_bytes == 0 {
        errors.push(ValidationError::BodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
