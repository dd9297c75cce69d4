//! Response normalization.
//!
//! [`normalize`] maps an HTTP status and a [`ParsedBody`] to either a success
//! value or a [`ServerError`]:
//!
//! - 204 with an empty body is `true`
//! - other success statuses yield the value under the resource key (falling
//!   back to a top-level `data` key); an absent or malformed body yields `null`
//! - for [`BodyStyle::JsonApi`] kinds, resource objects under `data` are
//!   flattened into plain maps
//! - any other status yields a [`ServerError`] built from the body's `errors`
//!   list, or from the raw body text when it is not JSON

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::rest::resources::{BodyStyle, ResourceKind};
use crate::rest::value::{AttributeMap, WireValue};

/// Status codes treated as success.
pub const SUCCESS_STATUS_CODES: [u16; 3] = [200, 201, 204];

/// Returns `true` if `status` is a success status.
#[must_use]
pub fn is_success(status: u16) -> bool {
    SUCCESS_STATUS_CODES.contains(&status)
}

/// A response body after a parse attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedBody {
    /// No body (or only whitespace).
    Empty,
    /// A JSON document.
    Json(Value),
    /// A body that is not valid JSON.
    Text(String),
}

impl ParsedBody {
    /// Parses raw body text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::Empty;
        }
        serde_json::from_str(raw).map_or_else(|_| Self::Text(raw.to_string()), Self::Json)
    }
}

/// One entry of a server error list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorEntry {
    /// A JSON-API error object.
    Detailed {
        /// The HTTP status as reported in the entry.
        #[serde(skip_serializing_if = "Option::is_none")]
        status: Option<String>,
        /// Human-readable detail.
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// A bare error string.
    Message(String),
}

impl ErrorEntry {
    fn from_value(value: &Value) -> Self {
        match value {
            Value::String(message) => Self::Message(message.clone()),
            Value::Object(entry) if entry.contains_key("status") || entry.contains_key("detail") => {
                Self::Detailed {
                    status: entry.get("status").map(WireValue::to_wire),
                    detail: entry.get("detail").map(WireValue::to_wire),
                }
            }
            other => Self::Message(other.to_string()),
        }
    }

    /// Returns the human-readable part of the entry.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Detailed { detail, .. } => detail.as_deref().unwrap_or_default(),
            Self::Message(message) => message,
        }
    }
}

/// A non-success response from the service.
///
/// The most recent one is kept by the client and is available through
/// [`Diner::last_error`](crate::Diner::last_error).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Flapjack responded with {status_code}: {}", join_messages(.errors))]
pub struct ServerError {
    /// The HTTP status code.
    pub status_code: u16,
    /// The normalized error list.
    pub errors: Vec<ErrorEntry>,
}

fn join_messages(errors: &[ErrorEntry]) -> String {
    errors
        .iter()
        .map(ErrorEntry::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ServerError {
    /// Builds a server error from a status and body.
    #[must_use]
    pub fn from_body(status_code: u16, body: &ParsedBody) -> Self {
        let errors = match body {
            ParsedBody::Empty => Vec::new(),
            ParsedBody::Text(raw) => vec![ErrorEntry::Message(raw.clone())],
            ParsedBody::Json(json) => match json.get("errors") {
                Some(Value::Array(entries)) => entries.iter().map(ErrorEntry::from_value).collect(),
                Some(entry) => vec![ErrorEntry::from_value(entry)],
                None => vec![ErrorEntry::Message(json.to_string())],
            },
        };
        Self {
            status_code,
            errors,
        }
    }
}

/// Converts a status and body into a success value or a [`ServerError`].
///
/// # Errors
///
/// Returns [`ServerError`] when `status` is not in [`SUCCESS_STATUS_CODES`].
pub fn normalize(kind: &ResourceKind, status: u16, body: &ParsedBody) -> Result<Value, ServerError> {
    if !is_success(status) {
        return Err(ServerError::from_body(status, body));
    }

    Ok(match body {
        ParsedBody::Empty if status == 204 => Value::Bool(true),
        ParsedBody::Json(json) => match (json.get(kind.name), json.get("data")) {
            (Some(value), _) => value.clone(),
            (None, Some(data)) if kind.body_style == BodyStyle::JsonApi => {
                flatten_resource_objects(data.clone())
            }
            (None, Some(data)) => data.clone(),
            (None, None) => Value::Null,
        },
        ParsedBody::Empty | ParsedBody::Text(_) => Value::Null,
    })
}

/// Flattens JSON-API resource objects (one, or a sequence) into plain maps.
///
/// `id`, `type` and every attribute become top-level fields. A relationship
/// with linkage becomes the linked id (to-one) or ids (to-many); relationships
/// carrying only links are dropped. Values that are not resource objects are
/// returned unchanged.
#[must_use]
pub fn flatten_resource_objects(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(flatten_resource_object).collect()),
        other => flatten_resource_object(other),
    }
}

fn flatten_resource_object(value: Value) -> Value {
    let mut object = match value {
        Value::Object(object)
            if object.contains_key("attributes") || object.contains_key("relationships") =>
        {
            object
        }
        other => return other,
    };

    let mut flat = AttributeMap::new();
    for key in ["id", "type"] {
        if let Some(value) = object.remove(key) {
            flat.insert(key.to_string(), value);
        }
    }
    if let Some(Value::Object(attributes)) = object.remove("attributes") {
        flat.extend(attributes);
    }
    if let Some(Value::Object(relationships)) = object.remove("relationships") {
        for (name, relationship) in relationships {
            if let Some(data) = relationship.get("data") {
                flat.insert(name, linked_ids(data));
            }
        }
    }
    Value::Object(flat)
}

fn linked_ids(data: &Value) -> Value {
    match data {
        Value::Array(items) => Value::Array(items.iter().map(linked_ids).collect()),
        Value::Object(reference) => reference.get("id").cloned().unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
