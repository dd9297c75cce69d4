//! Request/response trace sink.
//!
//! A [`RequestLogger`] receives pre-formatted lines for every outgoing
//! request and every response. It is purely observational.

use std::fmt;

/// Maximum number of response body characters passed to the logger.
pub const RESPONSE_BODY_LOG_LIMIT: usize = 300;

/// A sink for request/response trace lines.
///
/// # Example
///
/// ```rust
/// use std::sync::{Arc, Mutex};
/// use flapjack_diner::clients::RequestLogger;
///
/// #[derive(Debug, Default)]
/// struct Collect(Mutex<Vec<String>>);
///
/// impl RequestLogger for Collect {
///     fn log(&self, line: &str) {
///         self.0.lock().unwrap().push(line.to_string());
///     }
/// }
///
/// let sink = Arc::new(Collect::default());
/// sink.log("GET http://localhost:3081/rules");
/// assert_eq!(sink.0.lock().unwrap().len(), 1);
/// ```
pub trait RequestLogger: fmt::Debug + Send + Sync {
    /// Receives one trace line.
    fn log(&self, line: &str);
}

/// A [`RequestLogger`] that forwards lines to `tracing` at INFO level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl RequestLogger for TracingLogger {
    fn log(&self, line: &str) {
        tracing::info!(target: "flapjack_diner", "{line}");
    }
}

/// Formats the request line, e.g. `GET http://localhost:3081/rules`.
#[must_use]
pub fn request_line(method: &str, url: &str) -> String {
    format!("{method} {url}")
}

/// Formats the response status line, e.g. `  Response Code: 201 Created`.
#[must_use]
pub fn response_code_line(code: u16, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("  Response Code: {code} {reason}"),
        None => format!("  Response Code: {code}"),
    }
}

/// Formats the response body line, truncated to [`RESPONSE_BODY_LOG_LIMIT`] characters.
#[must_use]
pub fn response_body_line(body: &str) -> String {
    let truncated: String = body.chars().take(RESPONSE_BODY_LOG_LIMIT).collect();
    format!("  Response Body: {truncated}")
}
