//! Upstream invocation.
//!
//! One outbound request per incoming request through a default-configured
//! `hyper_util` legacy client with an HTTP/HTTPS connector: no timeout, no
//! retries, and redirects are not followed (a `3xx` is relayed to the
//! caller as-is). The target `Uri` goes on the wire unchanged and the
//! client's body is streamed upstream without buffering.

use axum::{
    body::Body,
    http::{Request, Response},
};
use hyper::body::Incoming;
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::proxy::error::ProxyError;
use crate::proxy::translate::TargetRequest;

/// HTTP client used for every upstream call.
#[derive(Debug, Clone)]
pub struct Upstream {
    client: Client<HttpsConnector<HttpConnector>, Body>,
}

impl Upstream {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpsConnector::new());
        Self { client }
    }

    /// Send `target` and wait for the upstream response head.
    pub async fn send(&self, target: TargetRequest) -> Result<Response<Incoming>, ProxyError> {
        let TargetRequest { method, uri, body } = target;

        // The client derives `Host` from the URI authority.
        let request = Request::builder().method(method).uri(uri).body(body)?;

        Ok(self.client.request(request).await?)
    }
}

impl Default for Upstream {
    fn default() -> Self {
        Self::new()
    }
}
