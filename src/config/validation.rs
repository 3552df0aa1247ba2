//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Bind address must be a socket address
//! - Allowed methods must be HTTP method tokens so the joined
//!   `Access-Control-Allow-Methods` value is always a legal header
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Method;
use thiserror::Error;

use crate::config::schema::{ActivityLogConfig, ProxyConfig};

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a socket address")]
    InvalidBindAddress(String),

    #[error("cors.allowed_methods[{index}] {method:?} is not a valid HTTP method")]
    InvalidMethod { index: usize, method: String },

    #[error("activity_log.path must not be empty")]
    EmptyActivityLogPath,
}

/// Check every semantic rule and collect all violations.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    for (index, method) in config.cors.allowed_methods.iter().enumerate() {
        // Method::from_bytes enforces the RFC 9110 token grammar and rejects "".
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::InvalidMethod {
                index,
                method: method.clone(),
            });
        }
    }

    if let ActivityLogConfig::File { path } = &config.activity_log {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyActivityLogPath);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
