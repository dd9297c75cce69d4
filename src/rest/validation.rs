//! Declarative argument validation.
//!
//! Each resource operation owns a static table of [`FieldRule`]s. [`validate`]
//! evaluates every rule against every attribute map and returns all
//! violations found; it never stops at the first one and never fails.
//! Fields without a rule are passed through unchecked.
//!
//! # Example
//!
//! ```rust
//! use flapjack_diner::rest::{validate, CheckKind, FieldRule};
//! use serde_json::json;
//!
//! const RULES: &[FieldRule] = &[
//!     FieldRule::required("name", CheckKind::String),
//!     FieldRule::optional("interval", CheckKind::PositiveInteger),
//! ];
//!
//! let map = json!({"interval": 0, "colour": "blue"});
//! let violations = validate([map.as_object().unwrap()], RULES);
//!
//! assert_eq!(violations.len(), 2);
//! assert_eq!(violations[0].field_name, "name");
//! assert_eq!(violations[1].field_name, "interval");
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

use crate::rest::value::AttributeMap;

/// The kind of check a [`FieldRule`] applies to a present value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckKind {
    /// A JSON string.
    String,
    /// An integer, or a string holding one.
    Integer,
    /// An integer greater than zero, or a string holding one.
    PositiveInteger,
    /// A JSON boolean, or the strings `"true"` / `"false"`.
    Boolean,
    /// A hyphenated UUID string.
    Uuid,
    /// A key/value mapping.
    Hash,
    /// A string, or an array of strings.
    StringOrArrayOfStrings,
    /// A to-one relationship: exactly one UUID string.
    SingularLinkUuid,
    /// A to-many relationship: an array of UUID strings.
    MultipleLinkUuid,
    /// A to-many relationship: an array of non-empty strings.
    MultipleLink,
    /// An ISO-8601 timestamp or date string.
    Time,
}

impl CheckKind {
    /// Returns the snake-case name of the check.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::PositiveInteger => "positive_integer",
            Self::Boolean => "boolean",
            Self::Uuid => "uuid",
            Self::Hash => "hash",
            Self::StringOrArrayOfStrings => "string_or_array_of_strings",
            Self::SingularLinkUuid => "singular_link_uuid",
            Self::MultipleLinkUuid => "multiple_link_uuid",
            Self::MultipleLink => "multiple_link",
            Self::Time => "time",
        }
    }

    /// Returns `true` for the relationship checks.
    #[must_use]
    pub const fn is_link(&self) -> bool {
        matches!(
            self,
            Self::SingularLinkUuid | Self::MultipleLinkUuid | Self::MultipleLink
        )
    }

    /// Describes what a valid value looks like.
    #[must_use]
    pub const fn expectation(&self) -> &'static str {
        match self {
            Self::String => "must be a string",
            Self::Integer => "must be an integer",
            Self::PositiveInteger => "must be a positive integer",
            Self::Boolean => "must be a boolean",
            Self::Uuid => "must be a UUID",
            Self::Hash => "must be a hash",
            Self::StringOrArrayOfStrings => "must be a string or an array of strings",
            Self::SingularLinkUuid => "must be a single UUID",
            Self::MultipleLinkUuid => "must be an array of UUIDs",
            Self::MultipleLink => "must be an array of non-empty strings",
            Self::Time => "must be an ISO 8601 time",
        }
    }

    /// Returns `true` if `value` satisfies this check.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => as_integer(value).is_some(),
            Self::PositiveInteger => as_integer(value).is_some_and(|n| n > 0),
            Self::Boolean => match value {
                Value::Bool(_) => true,
                Value::String(s) => s == "true" || s == "false",
                _ => false,
            },
            Self::Uuid | Self::SingularLinkUuid => value.as_str().is_some_and(is_uuid),
            Self::Hash => value.is_object(),
            Self::StringOrArrayOfStrings => match value {
                Value::String(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            },
            Self::MultipleLinkUuid => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| v.as_str().is_some_and(is_uuid))),
            Self::MultipleLink => value.as_array().is_some_and(|items| {
                items
                    .iter()
                    .all(|v| v.as_str().is_some_and(|s| !s.trim().is_empty()))
            }),
            Self::Time => value.as_str().is_some_and(is_time),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation rule for one named field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    /// The attribute (or option) name the rule applies to.
    pub field_name: &'static str,
    /// The check applied when the field is present.
    pub check_kind: CheckKind,
    /// Whether the field must be present and non-empty.
    pub required: bool,
}

impl FieldRule {
    /// A rule for a field that may be omitted.
    #[must_use]
    pub const fn optional(field_name: &'static str, check_kind: CheckKind) -> Self {
        Self {
            field_name,
            check_kind,
            required: false,
        }
    }

    /// A rule for a field that must be present and non-empty.
    #[must_use]
    pub const fn required(field_name: &'static str, check_kind: CheckKind) -> Self {
        Self {
            field_name,
            check_kind,
            required: true,
        }
    }

    /// Evaluates the rule against one attribute map.
    #[must_use]
    pub fn check(&self, index: usize, attributes: &AttributeMap) -> Option<Violation> {
        let value = attributes
            .get(self.field_name)
            .filter(|value| !value.is_null());

        match value {
            None if self.required => Some(self.violation(index, "is required")),
            None => None,
            Some(value) if self.required && is_empty(value) => {
                Some(self.violation(index, "is required"))
            }
            Some(value) if !self.check_kind.accepts(value) => {
                Some(self.violation(index, self.check_kind.expectation()))
            }
            Some(_) => None,
        }
    }

    fn violation(&self, index: usize, reason: &str) -> Violation {
        Violation {
            field_name: self.field_name,
            check_kind: self.check_kind,
            reason: reason.to_string(),
            index,
        }
    }
}

/// A failed [`FieldRule`] for one attribute map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The field that failed.
    pub field_name: &'static str,
    /// The check declared for the field.
    pub check_kind: CheckKind,
    /// Human-readable reason, e.g. `"is required"`.
    pub reason: String,
    /// Position of the attribute map in the call (0 for single-map calls).
    pub index: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' {}", self.field_name, self.reason)
    }
}

/// Validates every attribute map against every rule.
///
/// Violations are ordered by map, then by rule declaration order.
#[must_use]
pub fn validate<'a, I>(attributes: I, rules: &[FieldRule]) -> Vec<Violation>
where
    I: IntoIterator<Item = &'a AttributeMap>,
{
    attributes
        .into_iter()
        .enumerate()
        .flat_map(move |(index, map)| rules.iter().filter_map(move |rule| rule.check(index, map)))
        .collect()
}

/// Validates identifiers against the resource's identifier check.
///
/// Each failing identifier yields a violation on field `id`.
#[must_use]
pub fn validate_ids(ids: &[String], check_kind: CheckKind) -> Vec<Violation> {
    let rule = FieldRule::required("id", check_kind);
    ids.iter()
        .enumerate()
        .filter_map(|(index, id)| {
            let value = Value::String(id.clone());
            if id.trim().is_empty() {
                Some(rule.violation(index, "is required"))
            } else if rule.check_kind.accepts(&value) {
                None
            } else {
                Some(rule.violation(index, rule.check_kind.expectation()))
            }
        })
        .collect()
}

/// Violation raised when an operation that needs identifiers receives none.
#[must_use]
pub fn missing_ids(check_kind: CheckKind) -> Violation {
    Violation {
        field_name: "id",
        check_kind,
        reason: "at least one id is required".to_string(),
        index: 0,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        Value::String(s) => s.trim().parse::<i128>().ok(),
        _ => None,
    }
}

fn is_uuid(s: &str) -> bool {
    s.len() == 36 && uuid::Uuid::try_parse(s).is_ok()
}

fn is_time(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok() || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}
