//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Proxy handler produces:
//!     → activity.rs (fixed-format request/response lines, optional sink)
//!     → logging.rs  (structured diagnostic events via tracing)
//! ```
//!
//! # Design Decisions
//! - The activity log is an operator-facing record with an exact format
//! - Diagnostics go through `tracing` and are filtered like any other target
//! - Neither channel can fail a request

pub mod activity;
pub mod logging;

pub use activity::ActivityLog;
