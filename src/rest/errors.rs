//! Error types for resource operations.
//!
//! Failures fall into three families:
//!
//! - **Local**: [`DinerError::Validation`] and [`DinerError::Arguments`] are
//!   raised before any request is sent and never touch the last-error slot
//! - **Server**: [`DinerError::Server`] carries the status code and error
//!   list of a non-success response; it is also stored as the client's last error
//! - **Transport**: [`DinerError::Transport`] propagates the transport's
//!   failure unmodified
//!
//! # Example
//!
//! ```rust,ignore
//! use flapjack_diner::DinerError;
//!
//! match diner.delete_rules(&[]).await {
//!     Err(DinerError::Validation(e)) => {
//!         for violation in &e.violations {
//!             println!("{violation}");
//!         }
//!     }
//!     Err(DinerError::Server(e)) => println!("Flapjack said {}: {:?}", e.status_code, e.errors),
//!     Err(e) => println!("Other error: {e}"),
//!     Ok(_) => {}
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::clients::{InvalidHttpRequestError, TransportError};
use crate::rest::response::ServerError;
use crate::rest::validation::Violation;

/// Error type for resource operations.
#[derive(Debug, Error)]
pub enum DinerError {
    /// One or more field rules failed; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The call shape does not fit the operation; no request was sent.
    #[error(transparent)]
    Arguments(#[from] ArgumentError),

    /// The service answered with a non-success status.
    #[error(transparent)]
    Server(#[from] ServerError),

    /// The round trip could not be completed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The request descriptor could not be built.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// A body could not be encoded, or a success value could not be decoded.
    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl DinerError {
    /// Returns `true` for errors raised before any request was sent.
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Arguments(_) | Self::InvalidRequest(_)
        )
    }

    /// Returns the server error, if this is one.
    #[must_use]
    pub const fn server_error(&self) -> Option<&ServerError> {
        match self {
            Self::Server(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the validation violations, if this is a validation error.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(e) => &e.violations,
            _ => &[],
        }
    }
}

/// Field rule violations found before sending a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationError {
    /// The client method that was called, e.g. `create_rules`.
    pub operation: String,
    /// Every violation found, in map then rule order.
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid arguments for '{}': ", self.operation)?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            if violation.index > 0 {
                write!(f, "[{}] ", violation.index)?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

/// A call shape the operation does not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// An identifier appeared after an attribute map.
    #[error("'{operation}' received an identifier at position {position} after attribute data")]
    UnexpectedIdentifier {
        /// The client method that was called.
        operation: String,
        /// Zero-based argument position.
        position: usize,
    },

    /// Identifiers were passed to an operation that does not take them.
    #[error("'{operation}' does not accept identifier arguments")]
    UnexpectedIds {
        /// The client method that was called.
        operation: String,
    },

    /// Attribute maps were passed to an operation that does not take them.
    #[error("'{operation}' does not accept attribute data")]
    UnexpectedAttributes {
        /// The client method that was called.
        operation: String,
    },

    /// An operation that needs attribute maps received none.
    #[error("'{operation}' requires at least one set of attributes")]
    MissingAttributes {
        /// The client method that was called.
        operation: String,
    },

    /// Separately supplied identifiers cannot be paired with the attribute maps.
    #[error("'{operation}' received {ids} ids for {maps} sets of attributes")]
    IdCountMismatch {
        /// The client method that was called.
        operation: String,
        /// Number of identifiers supplied.
        ids: usize,
        /// Number of attribute maps supplied.
        maps: usize,
    },

    /// The resource kind does not support the operation.
    #[error("'{resource}' does not support {operation}")]
    UnsupportedOperation {
        /// The resource kind.
        resource: &'static str,
        /// The operation name.
        operation: &'static str,
    },
}
