//! Value coercion into wire strings.
//!
//! Query-string values, path identifiers and log lines all go through
//! [`coerce`]. Date/time values render as ISO-8601; everything else renders
//! via its natural string form.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde_json::Value;

/// Free-form resource attributes keyed by field name.
pub type AttributeMap = serde_json::Map<String, Value>;

/// A value with a canonical wire string form.
pub trait WireValue {
    /// Returns the wire representation.
    fn to_wire(&self) -> String;
}

/// Coerces a value into its wire string.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use flapjack_diner::rest::coerce;
/// use serde_json::json;
///
/// assert_eq!(coerce("web"), "web");
/// assert_eq!(coerce(&42_u64), "42");
/// assert_eq!(coerce(&json!(true)), "true");
/// assert_eq!(coerce(&json!(["a", "b"])), "a,b");
///
/// let time = Utc.with_ymd_and_hms(2015, 3, 1, 12, 30, 0).unwrap();
/// assert_eq!(coerce(&time), "2015-03-01T12:30:00+00:00");
/// ```
#[must_use]
pub fn coerce<V: WireValue + ?Sized>(value: &V) -> String {
    value.to_wire()
}

/// Converts a timestamp into an attribute value (an ISO-8601 string).
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use flapjack_diner::rest::time_value;
/// use serde_json::json;
///
/// let time = Utc.with_ymd_and_hms(2015, 3, 1, 0, 0, 0).unwrap();
/// assert_eq!(time_value(&time), json!("2015-03-01T00:00:00+00:00"));
/// ```
#[must_use]
pub fn time_value<Tz>(time: &DateTime<Tz>) -> Value
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Value::String(time.to_wire())
}

impl WireValue for Value {
    fn to_wire(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::String(s) => s.clone(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Array(items) => items
                .iter()
                .map(WireValue::to_wire)
                .collect::<Vec<_>>()
                .join(","),
            Self::Object(_) => self.to_string(),
        }
    }
}

impl WireValue for str {
    fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl WireValue for String {
    fn to_wire(&self) -> String {
        self.clone()
    }
}

impl WireValue for bool {
    fn to_wire(&self) -> String {
        self.to_string()
    }
}

macro_rules! display_wire_value {
    ($($t:ty),*) => {
        $(
            impl WireValue for $t {
                fn to_wire(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_wire_value!(i32, i64, u32, u64, usize, f64);

impl<Tz> WireValue for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn to_wire(&self) -> String {
        self.to_rfc3339()
    }
}

impl WireValue for NaiveDateTime {
    fn to_wire(&self) -> String {
        self.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

impl WireValue for NaiveDate {
    fn to_wire(&self) -> String {
        self.format("%Y-%m-%d").to_string()
    }
}

impl WireValue for uuid::Uuid {
    fn to_wire(&self) -> String {
        self.hyphenated().to_string()
    }
}
