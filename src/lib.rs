//! Open CORS proxy.
//!
//! Serves `/<absolute-url>` by fetching `<absolute-url>` and relaying the
//! response with `Access-Control-Allow-Origin: *` and
//! `Access-Control-Allow-Methods` added, so browser scripts can read
//! cross-origin resources. `OPTIONS` preflights are answered locally.

pub mod config;
pub mod cors;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use cors::CorsHeaders;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::ProxyHandler;
