//! Request translation: incoming request → upstream target.
//!
//! ```text
//! GET /http://something.tld/blog/feed.atom?page=2
//!     → GET http://something.tld/blog/feed.atom?page=2
//! ```
//!
//! Exactly one leading `/` is stripped from the request-target (path plus
//! query as received); the rest is the absolute target URI. It is parsed
//! as an `http::Uri`, which keeps path and query byte-for-byte: no dot
//! segment removal, no re-encoding. Method and body pass through untouched.
//!
//! An absolute-form request-target (`GET http://upstream/status HTTP/1.1`)
//! that does not itself embed a target names the upstream directly.

use std::str::FromStr;

use axum::{
    body::Body,
    http::{
        uri::{InvalidUri, PathAndQuery},
        Method, Request, Uri,
    },
};
use thiserror::Error;

/// Why a request-target does not name an upstream.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error(transparent)]
    Parse(#[from] InvalidUri),

    #[error("target {0:?} is not an absolute URL (missing scheme or host)")]
    NotAbsolute(String),
}

/// The request to issue upstream.
#[derive(Debug)]
pub struct TargetRequest {
    pub method: Method,
    pub uri: Uri,
    /// The client's body stream, not yet read.
    pub body: Body,
}

/// Path and query of `uri` exactly as received.
pub fn request_uri(uri: &Uri) -> &str {
    uri.path_and_query().map(PathAndQuery::as_str).unwrap_or("/")
}

/// Parse the target embedded in a request-target.
pub fn target_uri(request_uri: &str) -> Result<Uri, TargetError> {
    let target = request_uri.strip_prefix('/').unwrap_or(request_uri);
    let uri = Uri::from_str(target)?;

    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(TargetError::NotAbsolute(target.to_string()));
    }
    Ok(uri)
}

/// Resolve the upstream for a received URI.
///
/// The embedded `/<absolute-url>` form wins; an absolute-form URI without
/// one is used as received.
pub fn resolve(uri: &Uri) -> Result<Uri, TargetError> {
    match target_uri(request_uri(uri)) {
        Err(_) if uri.scheme().is_some() && uri.authority().is_some() => Ok(uri.clone()),
        result => result,
    }
}

/// Derive the upstream request from the client's request.
pub fn translate(request: Request<Body>) -> Result<TargetRequest, TargetError> {
    let (parts, body) = request.into_parts();
    let uri = resolve(&parts.uri)?;

    Ok(TargetRequest {
        method: parts.method,
        uri,
        body,
    })
}
