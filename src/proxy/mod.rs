//! The CORS proxy handler.
//!
//! # Data Flow
//! ```text
//! incoming request
//!     → dispatch (log CLIENT REQUEST, branch on method)
//!         OPTIONS → preflight.rs (204 + CORS headers, no upstream)
//!         other   → translate.rs (strip leading '/', parse target URL)
//!                 → upstream.rs (one outbound request)
//!                 → relay.rs (status, headers + CORS, streamed body)
//! ```
//!
//! # Design Decisions
//! - Handler state is immutable and cloned per request; the only lock guards
//!   the shared activity sink
//! - Every path ends in exactly one response value
//! - Failures before the upstream head arrives become plain-text 500s

pub mod error;
pub mod preflight;
pub mod relay;
pub mod translate;
pub mod upstream;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::{IntoResponse, Response},
};

use crate::config::{ConfigError, ProxyConfig};
use crate::cors::CorsHeaders;
use crate::observability::ActivityLog;

pub use error::{ProxyError, MISSING_REQUEST_MESSAGE};
pub use translate::{TargetError, TargetRequest};
pub use upstream::Upstream;

/// Turns any request for `/<absolute-url>` into a proxied, CORS-enabled response.
///
/// A request for `http://example.com/http://something.tld/blog/feed.atom`
/// fetches `http://something.tld/blog/feed.atom` and relays it with
/// `Access-Control-Allow-Origin: *` and `Access-Control-Allow-Methods` added.
#[derive(Debug, Clone, Default)]
pub struct ProxyHandler {
    cors: CorsHeaders,
    activity: ActivityLog,
    upstream: Upstream,
}

impl ProxyHandler {
    pub fn new(cors: CorsHeaders, activity: ActivityLog, upstream: Upstream) -> Self {
        Self {
            cors,
            activity,
            upstream,
        }
    }

    /// Build a handler from a validated configuration.
    ///
    /// Opens the activity log destination and the upstream client.
    pub fn from_config(config: &ProxyConfig) -> Result<Self, ConfigError> {
        let cors = CorsHeaders::new(&config.cors.allowed_methods)?;
        let activity = ActivityLog::from_config(&config.activity_log)?;

        Ok(Self::new(cors, activity, Upstream::default()))
    }

    pub fn cors(&self) -> &CorsHeaders {
        &self.cors
    }

    /// Handle one client request.
    pub async fn handle(&self, request: Request<Body>) -> Response {
        self.dispatch(Some(request)).await
    }

    /// Method dispatcher. `None` yields a 500 with [`MISSING_REQUEST_MESSAGE`].
    pub async fn dispatch(&self, request: Option<Request<Body>>) -> Response {
        let Some(request) = request else {
            tracing::error!("Handler invoked without a request");
            return ProxyError::MissingRequest.into_response();
        };

        self.activity.client_request(
            request.method(),
            client_host(&request),
            translate::request_uri(request.uri()),
        );

        if request.method() == Method::OPTIONS {
            tracing::debug!(uri = %request.uri(), "Answering preflight");
            return preflight::preflight(&self.cors);
        }

        match self.forward(request).await {
            Ok(response) => response,
            Err(error) => {
                match &error {
                    ProxyError::Upstream(e) => tracing::error!(error = %e, "Upstream error"),
                    other => tracing::warn!(error = %other, "Cannot proxy request"),
                }
                error.into_response()
            }
        }
    }

    async fn forward(&self, request: Request<Body>) -> Result<Response, ProxyError> {
        let target = translate::translate(request)?;
        let method = target.method.clone();
        let uri = target.uri.clone();

        tracing::debug!(method = %method, target = %uri, "Proxying request");
        self.activity.proxy_request(&method, &uri);

        // Redirects are not followed, so the response belongs to this exact
        // method and URI.
        let upstream = self.upstream.send(target).await?;
        self.activity.proxy_response(upstream.status(), &method, &uri);

        relay::relay(upstream, &uri, &self.cors)
    }
}

/// Host the client addressed: `Host` header, else the URI authority.
fn client_host(request: &Request<Body>) -> &str {
    request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
        .unwrap_or_default()
}
