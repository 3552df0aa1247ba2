//! CORS response headers.
//!
//! Every response the proxy produces, relayed or preflight, gets one
//! `Access-Control-Allow-Origin` and one `Access-Control-Allow-Methods`
//! entry appended by [`CorsHeaders::apply`].
//!
//! # Design Decisions
//! - Headers are appended, never inserted: existing entries are left alone
//! - The methods value is rendered once at construction, not per request
//! - Method names are joined verbatim (case and order preserved)

use axum::http::header::{self, HeaderMap, HeaderValue, InvalidHeaderValue};

/// Methods advertised when the operator configures none.
pub const DEFAULT_ALLOWED_METHODS: &str = "GET, DELETE, HEAD, OPTIONS, PATCH, POST, PUT, TRACE";

/// Render the `Access-Control-Allow-Methods` value for a method list.
///
/// An empty list falls back to [`DEFAULT_ALLOWED_METHODS`].
pub fn allowed_methods<S: AsRef<str>>(methods: &[S]) -> String {
    if methods.is_empty() {
        return DEFAULT_ALLOWED_METHODS.to_string();
    }

    methods
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The pair of CORS headers added to every outgoing response.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_methods: HeaderValue,
}

impl CorsHeaders {
    /// Build the header pair for the given methods.
    ///
    /// Fails only if a method name contains bytes that cannot appear in a
    /// header value.
    pub fn new<S: AsRef<str>>(methods: &[S]) -> Result<Self, InvalidHeaderValue> {
        let allow_methods = HeaderValue::from_str(&allowed_methods(methods))?;
        Ok(Self { allow_methods })
    }

    /// Value sent in `Access-Control-Allow-Methods`.
    pub fn allow_methods(&self) -> &HeaderValue {
        &self.allow_methods
    }

    /// Append both CORS headers to `headers`.
    ///
    /// Not idempotent: a second call appends a second entry for each name.
    /// Call exactly once per response.
    pub fn apply(&self, headers: &mut HeaderMap) {
        headers.append(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        );
        headers.append(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.allow_methods.clone(),
        );
    }
}

impl Default for CorsHeaders {
    fn default() -> Self {
        Self {
            allow_methods: HeaderValue::from_static(DEFAULT_ALLOWED_METHODS),
        }
    }
}
