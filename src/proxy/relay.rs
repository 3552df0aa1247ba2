//! Response relay: upstream response → client response.
//!
//! # Steps
//! 1. Append CORS headers to the upstream header map
//! 2. Copy every header value, duplicates and their order included
//! 3. Use the upstream status verbatim
//! 4. Stream the upstream body through unbuffered
//!
//! # Design Decisions
//! - The upstream body is owned by the outgoing body stream, so the upstream
//!   connection is released when that stream ends or is dropped, on every path
//! - A body error after the head is sent just ends the stream

use axum::{
    body::Body,
    http::{Response, Uri},
};
use futures_util::TryStreamExt;
use hyper::body::Incoming;

use crate::cors::CorsHeaders;
use crate::proxy::error::ProxyError;

/// Build the client response from the response `target` returned.
pub fn relay(
    upstream: Response<Incoming>,
    target: &Uri,
    cors: &CorsHeaders,
) -> Result<Response<Body>, ProxyError> {
    let (parts, body) = upstream.into_parts();
    let mut headers = parts.headers;
    cors.apply(&mut headers);

    let mut builder = Response::builder().status(parts.status);
    if let Some(outgoing) = builder.headers_mut() {
        for (name, value) in &headers {
            outgoing.append(name, value.clone());
        }
    }

    let target = target.clone();
    let body = Body::new(body).into_data_stream().inspect_err(move |error| {
        tracing::warn!(upstream = %target, error = %error, "Upstream body ended early");
    });

    Ok(builder.body(Body::from_stream(body))?)
}
