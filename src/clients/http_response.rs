//! HTTP response type returned by a [`Transport`](crate::clients::Transport).
//!
//! The response is handed to the response normalizer untouched; this type
//! only offers header lookup helpers.

use std::collections::HashMap;

/// A raw HTTP response from the Flapjack API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// The status reason phrase (e.g. `"Created"`), if known.
    pub reason: Option<String>,
    /// Response headers keyed by lowercase name (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body (empty for no content).
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` without a reason phrase.
    ///
    /// Header names are lowercased.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: impl Into<String>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();
        Self {
            code,
            reason: None,
            headers,
            body: body.into(),
        }
    }

    /// Sets the status reason phrase.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Returns the first value of the named header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Content-Type` media type with all parameters stripped.
    ///
    /// `application/vnd.api+json; supported-ext=bulk; charset=utf-8` yields
    /// `application/vnd.api+json`.
    #[must_use]
    pub fn media_type(&self) -> Option<&str> {
        self.header("content-type")
            .and_then(|value| value.split(';').next())
            .map(str::trim)
            .filter(|media| !media.is_empty())
    }

    /// Returns `true` when the body is empty or whitespace only.
    #[must_use]
    pub fn is_body_empty(&self) -> bool {
        self.body.trim().is_empty()
    }
}
