//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the CORS proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// CORS header settings.
    pub cors: CorsConfig,

    /// Where activity lines are written.
    pub activity_log: ActivityLogConfig,

    /// Diagnostic logging settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CorsConfig {
    /// Methods listed in `Access-Control-Allow-Methods`, in order.
    ///
    /// Case-sensitive and emitted verbatim. Empty means
    /// `GET, DELETE, HEAD, OPTIONS, PATCH, POST, PUT, TRACE`.
    /// WebDAV deployments typically add `COPY`, `LOCK`, `MKCOL`, `MOVE`,
    /// `PROPFIND`, `PROPPATCH` and `UNLOCK`.
    pub allowed_methods: Vec<String>,
}

/// Activity log destination.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(tag = "target", rename_all = "lowercase")]
pub enum ActivityLogConfig {
    /// No activity lines.
    Off,
    /// Standard output.
    #[default]
    Stdout,
    /// Standard error.
    Stderr,
    /// Append to a file, creating it if needed.
    File { path: PathBuf },
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
