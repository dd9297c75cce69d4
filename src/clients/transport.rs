//! Transport collaborator.
//!
//! The request pipeline never talks to the network directly: it hands a
//! method, an absolute URL, headers and an optional body to a [`Transport`]
//! and receives an [`HttpResponse`] back. [`HttpTransport`] is the
//! reqwest-backed implementation; tests substitute in-memory transports.

use std::collections::HashMap;
use std::future::Future;

use crate::clients::errors::TransportError;
use crate::clients::http_request::HttpMethod;
use crate::clients::http_response::HttpResponse;

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Performs one HTTP round trip.
///
/// Implementations must support GET, POST, PUT, PATCH and DELETE with
/// arbitrary headers and an optional body (including on DELETE). A completed
/// round trip with an error status is an `Ok` response; only failures to
/// complete the round trip are `Err`.
///
/// The returned future is `Send`, so operations over any transport can run on
/// spawned tasks. Implementations may still be written as `async fn`.
pub trait Transport: Send + Sync {
    /// Sends a request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when the round trip cannot be completed.
    fn perform(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// [`Transport`] backed by a `reqwest` async client.
///
/// `HttpTransport` imposes no timeout and performs no retries.
///
/// # Example
///
/// ```rust,ignore
/// use flapjack_diner::clients::{HttpMethod, HttpTransport, Transport};
///
/// let transport = HttpTransport::new()?;
/// let response = transport
///     .perform(HttpMethod::Get, "http://localhost:3081/rules", &[], None)
///     .await?;
/// println!("{}", response.code);
/// ```
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

// Verify HttpTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpTransport>();
};

impl HttpTransport {
    /// Creates a transport with a fresh rustls-backed client.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the client cannot be created
    /// (e.g. TLS initialization failure).
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(format!("flapjack-diner v{CLIENT_VERSION}"))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client (e.g. one configured with a timeout).
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    const fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Transport for HttpTransport {
    async fn perform(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &[(String, String)],
        body: Option<&str>,
    ) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self.client.request(Self::to_reqwest_method(method), url);

        for (name, value) in headers {
            let header_name = reqwest::header::HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidHeader { name: name.clone() })?;
            let header_value = reqwest::header::HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader { name: name.clone() })?;
            req_builder = req_builder.header(header_name, header_value);
        }

        if let Some(body) = body {
            req_builder = req_builder.body(body.to_string());
        }

        let res = req_builder.send().await?;

        let status = res.status();
        let res_headers = Self::parse_response_headers(res.headers());
        let body_text = res.text().await?;

        let response = HttpResponse::new(status.as_u16(), res_headers, body_text);
        Ok(match status.canonical_reason() {
            Some(reason) => response.with_reason(reason),
            None => response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_builds() {
        assert!(HttpTransport::new().is_ok());
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(
            HttpTransport::to_reqwest_method(HttpMethod::Patch),
            reqwest::Method::PATCH
        );
        assert_eq!(
            HttpTransport::to_reqwest_method(HttpMethod::Delete),
            reqwest::Method::DELETE
        );
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpTransport>();
    }
}
