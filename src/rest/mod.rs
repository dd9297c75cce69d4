//! Resource operations for the Flapjack JSON-API.
//!
//! A call flows through these parts in order:
//!
//! - [`arguments`]: reduces call arguments to a [`CanonicalRequest`]
//!   (ids, payload, query options)
//! - [`validate`]: checks attribute maps and options against static
//!   [`FieldRule`] tables, collecting every [`Violation`]
//! - [`pipeline`]: builds path, query string, body and content type, and
//!   performs the round trip through a [`Transport`](crate::clients::Transport)
//! - [`response`]: maps status and body to a success value or a [`ServerError`]
//!
//! [`Diner`] drives the flow and keeps the last server error.
//! [`resources`] declares each resource kind and its typed client methods.
//!
//! # Example
//!
//! ```rust,ignore
//! use flapjack_diner::{BaseUrl, Diner, DinerConfig, DinerError};
//! use serde_json::json;
//!
//! let diner = Diner::new(DinerConfig::builder().base_url(BaseUrl::new("localhost:3081")?).build()?)?;
//!
//! let tags = vec![
//!     json!({"id": "t1", "name": "x"}).as_object().cloned().unwrap(),
//!     json!({"id": "t2", "name": "y"}).as_object().cloned().unwrap(),
//! ];
//! // One bulk PUT to /tags
//! assert!(diner.update_tags(tags).await?);
//!
//! match diner.rules(&["05983623-fcef-42da-af44-ed6990b500fa"], None).await {
//!     Ok(rule) => println!("{rule}"),
//!     Err(DinerError::Server(e)) => println!("{}: {:?}", e.status_code, e.errors),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod arguments;
mod client;
mod errors;
mod path;
pub mod pipeline;
pub mod resources;
pub mod response;
mod validation;
mod value;

pub use arguments::{normalize, Arg, CanonicalRequest, Payload, QUERY_KEYS};
pub use client::Diner;
pub use errors::{ArgumentError, DinerError, ValidationError};
pub use path::{collection_path, member_path, ResourceOperation};
pub use resources::{parse_as, to_attributes, BodyStyle, ResourceKind, READ_OPTION_RULES};
pub use response::{ErrorEntry, ParsedBody, ServerError, SUCCESS_STATUS_CODES};
pub use validation::{missing_ids, validate, validate_ids, CheckKind, FieldRule, Violation};
pub use value::{coerce, time_value, AttributeMap, WireValue};
