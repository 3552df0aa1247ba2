//! Errors that end a request with `500 Internal Server Error`.

use std::error::Error as _;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::proxy::translate::TargetError;

/// Body sent when the handler is invoked without a request.
pub const MISSING_REQUEST_MESSAGE: &str = "Internal Server Error: no request to proxy";

/// Failures before the upstream status line reaches the client.
///
/// Each becomes a plain-text `500` whose body is the `Display` text.
/// Failures while streaming the relayed body are not represented here:
/// by then the status and headers are already on the wire.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("{}", MISSING_REQUEST_MESSAGE)]
    MissingRequest,

    /// The request-target does not name an absolute upstream URL.
    #[error(transparent)]
    InvalidTarget(#[from] TargetError),

    /// DNS, connect, TLS or protocol failure talking to the upstream.
    #[error("{}", error_chain(.0))]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The outbound request or relayed response could not be assembled.
    #[error(transparent)]
    Http(#[from] axum::http::Error),
}

/// `outer: cause: root cause`, so the client sees why a connect failed and
/// not just that it did.
fn error_chain(error: &hyper_util::client::legacy::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
