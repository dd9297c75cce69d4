//! Wire-level types for Flapjack API communication.
//!
//! # Overview
//!
//! - [`HttpRequest`]: a request descriptor (method, path, query, body, content type)
//! - [`HttpResponse`]: a raw response (status, reason, headers, body)
//! - [`HttpMethod`]: GET, POST, PUT, PATCH, DELETE
//! - [`ContentType`]: singular or bulk JSON-API media type
//! - [`Transport`]: the round-trip collaborator, implemented by [`HttpTransport`]
//! - [`RequestLogger`]: the trace sink, implemented by [`TracingLogger`]
//!
//! Higher-level resource operations live in [`crate::rest`].

mod errors;
mod http_request;
mod http_response;
pub mod logging;
mod transport;

pub use errors::{InvalidHttpRequestError, TransportError};
pub use http_request::{ContentType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use logging::{RequestLogger, TracingLogger};
pub use transport::{HttpTransport, Transport, CLIENT_VERSION};
