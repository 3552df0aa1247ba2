//! HTTP hosting for the proxy handler.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing layer)
//!     → proxy::ProxyHandler (dispatch, translate, forward, relay)
//!     → Send to client
//! ```

pub mod server;

pub use server::HttpServer;
