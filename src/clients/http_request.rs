//! HTTP request descriptors.
//!
//! This module provides the [`HttpRequest`] type and its builder. A request
//! descriptor is plain data derived deterministically from a canonical
//! request; the transport turns it into an actual round trip.

use std::fmt;

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the Flapjack API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for reading resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resource attributes.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the upper-case method token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Returns `true` for methods that must carry a body.
    #[must_use]
    pub const fn requires_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Content type for request bodies.
///
/// Singular requests address one resource; bulk requests carry or target
/// several resources and add the `ext=bulk` media type parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `application/vnd.api+json`
    JsonApi,
    /// `application/vnd.api+json; ext=bulk`
    JsonApiBulk,
}

impl ContentType {
    /// The JSON-API media type without parameters.
    pub const MEDIA_TYPE: &'static str = "application/vnd.api+json";

    /// Returns the `Content-Type` header value.
    #[must_use]
    pub const fn as_header_value(&self) -> &'static str {
        match self {
            Self::JsonApi => "application/vnd.api+json",
            Self::JsonApiBulk => "application/vnd.api+json; ext=bulk",
        }
    }

    /// Picks the singular or bulk variant by the number of addressed resources.
    #[must_use]
    pub const fn for_count(count: usize) -> Self {
        if count > 1 {
            Self::JsonApiBulk
        } else {
            Self::JsonApi
        }
    }

    /// Returns `true` for the bulk variant.
    #[must_use]
    pub const fn is_bulk(&self) -> bool {
        matches!(self, Self::JsonApiBulk)
    }
}

/// An HTTP request descriptor.
///
/// Use [`HttpRequest::builder`] to construct requests.
///
/// # Example
///
/// ```rust
/// use flapjack_diner::clients::{ContentType, HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/tags")
///     .body(r#"{"tags":{"name":"database"}}"#)
///     .content_type(ContentType::JsonApi)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.target(), "/tags");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute path (e.g. `/rules/<id>`).
    pub path: String,
    /// The encoded query string without the leading `?`, if any.
    pub query: Option<String>,
    /// The serialized request body, if any.
    pub body: Option<String>,
    /// The content type of the body.
    pub content_type: Option<ContentType>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Returns the path joined with the query string.
    #[must_use]
    pub fn target(&self) -> String {
        match self.query.as_deref() {
            Some(query) if !query.is_empty() => format!("{}?{query}", self.path),
            _ => self.path.clone(),
        }
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `body` is `Some` but `content_type` is `None`
    /// - the method is POST, PUT or PATCH and `body` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.body.is_some() && self.content_type.is_none() {
            return Err(InvalidHttpRequestError::MissingContentType);
        }

        if self.http_method.requires_body() && self.body.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    query: Option<String>,
    body: Option<String>,
    content_type: Option<ContentType>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            query: None,
            body: None,
            content_type: None,
        }
    }

    /// Sets the encoded query string. Empty strings are dropped.
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }

    /// Sets the serialized request body.
    ///
    /// When setting a body, you must also set the content type via
    /// [`content_type`](Self::content_type).
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the content type of the request body.
    #[must_use]
    pub const fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            query: self.query,
            body: self.body,
            content_type: self.content_type,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_content_type_header_values() {
        assert_eq!(
            ContentType::JsonApi.as_header_value(),
            "application/vnd.api+json"
        );
        assert_eq!(
            ContentType::JsonApiBulk.as_header_value(),
            "application/vnd.api+json; ext=bulk"
        );
    }

    #[test]
    fn test_content_type_for_count() {
        assert_eq!(ContentType::for_count(1), ContentType::JsonApi);
        assert_eq!(ContentType::for_count(2), ContentType::JsonApiBulk);
        assert!(ContentType::for_count(5).is_bulk());
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "/rules")
            .query("page=2")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.target(), "/rules?page=2");
        assert!(request.body.is_none());
    }

    #[test]
    fn test_empty_query_is_dropped() {
        let request = HttpRequest::builder(HttpMethod::Get, "/rules")
            .query("")
            .build()
            .unwrap();
        assert!(request.query.is_none());
        assert_eq!(request.target(), "/rules");
    }

    #[test]
    fn test_verify_requires_body_for_patch() {
        let result = HttpRequest::builder(HttpMethod::Patch, "/rules/1").build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "PATCH"
        ));
    }

    #[test]
    fn test_delete_may_carry_a_body() {
        let request = HttpRequest::builder(HttpMethod::Delete, "/rules")
            .body(r#"{"data":[]}"#)
            .content_type(ContentType::JsonApiBulk)
            .build()
            .unwrap();
        assert!(request.body.is_some());
    }

    #[test]
    fn test_verify_requires_content_type_when_body_present() {
        let result = HttpRequest::builder(HttpMethod::Delete, "/rules")
            .body("{}")
            .build();

        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingContentType)
        ));
    }
}
