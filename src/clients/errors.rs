//! Wire-level error types.
//!
//! - [`TransportError`]: the transport could not complete a round trip
//!   (connection refused, timeout, TLS failure, unreadable body)
//! - [`InvalidHttpRequestError`]: a request descriptor failed validation
//!   before being handed to the transport
//!
//! Neither type is produced for a completed round trip that carries an error
//! status; those are reported by the response normalizer instead.

use thiserror::Error;

/// Error returned when the transport fails to complete a round trip.
///
/// This error is never swallowed or retried by the client; it propagates
/// to the caller unmodified.
///
/// # Example
///
/// ```rust,ignore
/// use flapjack_diner::clients::TransportError;
///
/// match diner.rules(&[], None).await {
///     Err(flapjack_diner::DinerError::Transport(TransportError::Network(e))) => {
///         println!("Flapjack unreachable: {e}");
///     }
///     _ => {}
/// }
/// ```
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, TLS, timeout or body-read error from the HTTP stack.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The transport rejected a header name or value.
    #[error("Invalid header '{name}'")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },
}

/// Error returned when a request descriptor fails validation.
///
/// # Example
///
/// ```rust
/// use flapjack_diner::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "POST".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use POST without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A request body was provided without a content type.
    #[error("Cannot set a body without also setting content_type.")]
    MissingContentType,

    /// A POST, PUT or PATCH request was built without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}
