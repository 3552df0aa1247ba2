//! Activity log: one plain-text line per proxy step.
//!
//! # Line Formats
//! ```text
//! CLIENT REQUEST: <METHOD> http://<host><request-uri>
//! PROXY REQUEST:  <METHOD> http://<host><request-uri>
//! PROXY RESPONSE: <status-line> <METHOD> http://<host><request-uri>
//! ```
//!
//! # Design Decisions
//! - Independent of `tracing` so the line format stays exact
//! - No sink configured = every call is a no-op
//! - Write failures are swallowed; logging never affects a request

use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use axum::http::{uri::Authority, Method, StatusCode, Uri};

use crate::config::ActivityLogConfig;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Shared, optional writer for activity lines.
#[derive(Clone, Default)]
pub struct ActivityLog {
    sink: Option<Sink>,
}

impl ActivityLog {
    /// A log that drops every line.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// A log writing to `writer`.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            sink: Some(Arc::new(Mutex::new(Box::new(writer)))),
        }
    }

    /// Open the destination named by the configuration.
    ///
    /// Files are opened in append mode and created if missing.
    pub fn from_config(config: &ActivityLogConfig) -> io::Result<Self> {
        let log = match config {
            ActivityLogConfig::Off => Self::disabled(),
            ActivityLogConfig::Stdout => Self::new(io::stdout()),
            ActivityLogConfig::Stderr => Self::new(io::stderr()),
            ActivityLogConfig::File { path } => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Self::new(file)
            }
        };
        Ok(log)
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Record a request as received from the client.
    pub fn client_request(&self, method: &Method, host: &str, request_uri: &str) {
        self.write_line(format_args!("CLIENT REQUEST: {method} http://{host}{request_uri}"));
    }

    /// Record the derived upstream request, before it is sent.
    pub fn proxy_request(&self, method: &Method, uri: &Uri) {
        self.write_line(format_args!(
            "PROXY REQUEST:  {method} http://{}{}",
            authority(uri),
            request_uri(uri)
        ));
    }

    /// Record the upstream response line for the request that produced it.
    pub fn proxy_response(&self, status: StatusCode, method: &Method, uri: &Uri) {
        self.write_line(format_args!(
            "PROXY RESPONSE: {} {method} http://{}{}",
            status_line(status),
            authority(uri),
            request_uri(uri)
        ));
    }

    fn write_line(&self, line: fmt::Arguments<'_>) {
        let Some(sink) = &self.sink else {
            return;
        };

        // A panic mid-write only costs a partial line; keep logging.
        let mut writer = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "{line}").and_then(|_| writer.flush());
    }
}

impl fmt::Debug for ActivityLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivityLog")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

/// `200 OK` style status line; bare code when the status has no reason phrase.
pub fn status_line(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {reason}", status.as_u16()),
        None => status.as_u16().to_string(),
    }
}

/// Host and port exactly as written in the target.
fn authority(uri: &Uri) -> &str {
    uri.authority().map(Authority::as_str).unwrap_or_default()
}

fn request_uri(uri: &Uri) -> &str {
    crate::proxy::translate::request_uri(uri)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::other("sink closed"))
        }
    }

    #[test]
    fn test_line_formats() {
        let capture = Capture::default();
        let log = ActivityLog::new(capture.clone());
        let uri: Uri = "https://upstream.test:8443/a/b?x=1".parse().unwrap();

        log.client_request(&Method::GET, "proxy.local", "/https://upstream.test:8443/a/b?x=1");
        log.proxy_request(&Method::GET, &uri);
        log.proxy_response(StatusCode::OK, &Method::GET, &uri);

        assert_eq!(
            capture.contents(),
            "CLIENT REQUEST: GET http://proxy.local/https://upstream.test:8443/a/b?x=1\n\
             PROXY REQUEST:  GET http://upstream.test:8443/a/b?x=1\n\
             PROXY RESPONSE: 200 OK GET http://upstream.test:8443/a/b?x=1\n"
        );
    }

    #[test]
    fn test_explicit_default_port_kept() {
        let capture = Capture::default();
        let log = ActivityLog::new(capture.clone());
        let uri: Uri = "http://example.com:80/a/../feed.atom?q='x'".parse().unwrap();

        log.proxy_request(&Method::POST, &uri);

        assert_eq!(
            capture.contents(),
            "PROXY REQUEST:  POST http://example.com:80/a/../feed.atom?q='x'\n"
        );
    }

    #[test]
    fn test_disabled_is_noop() {
        let log = ActivityLog::disabled();
        assert!(!log.is_enabled());
        log.client_request(&Method::GET, "proxy.local", "/");
    }

    #[test]
    fn test_write_errors_ignored() {
        let log = ActivityLog::new(Broken);
        log.client_request(&Method::GET, "proxy.local", "/");
        log.proxy_response(StatusCode::BAD_GATEWAY, &Method::GET, &Uri::from_static("http://x.test/"));
    }

    #[test]
    fn test_status_line() {
        assert_eq!(status_line(StatusCode::NOT_FOUND), "404 Not Found");
        assert_eq!(status_line(StatusCode::from_u16(599).unwrap()), "599");
    }
}
