//! Preflight (`OPTIONS`) responses, answered locally.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::cors::CorsHeaders;

/// `204 No Content` with the CORS headers and an empty body.
///
/// Never contacts an upstream and never reads the request body.
pub fn preflight(cors: &CorsHeaders) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    cors.apply(response.headers_mut());
    response
}
