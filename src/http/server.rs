//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router that sends every request to the proxy handler
//! - Wire up middleware (request tracing)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::proxy::ProxyHandler;

/// HTTP server hosting a [`ProxyHandler`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server around the given handler.
    pub fn new(handler: ProxyHandler) -> Self {
        let router = Self::build_router(handler);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// A fallback rather than a path pattern: request-targets such as
    /// `/http://host/` carry empty segments and must reach the handler as-is.
    pub fn build_router(handler: ProxyHandler) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(handler)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn proxy_handler(State(handler): State<ProxyHandler>, request: Request<Body>) -> Response {
    handler.handle(request).await
}
