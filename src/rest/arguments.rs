//! Argument normalization.
//!
//! Every resource operation reduces its call arguments to a
//! [`CanonicalRequest`]: ordered identifiers, an optional payload (one map or
//! a sequence of maps) and query options.
//!
//! Typed client methods build canonical requests directly through
//! [`CanonicalRequest::create`], [`CanonicalRequest::read`],
//! [`CanonicalRequest::update`] and [`CanonicalRequest::delete`].
//! [`normalize`] accepts a positional list of [`Arg`]s instead and infers the
//! same shape from it:
//!
//! - leading identifiers are collected in order into `ids`
//! - attribute maps are collected in order into the payload
//! - a final map holding only option keys (`filter`, `sort`, `include`,
//!   `fields`, `page`, `per_page`) becomes the query when no identifier
//!   precedes it, or always for reads
//!
//! # Example
//!
//! ```rust
//! use flapjack_diner::rest::{normalize, Arg, ResourceOperation};
//! use serde_json::json;
//!
//! let options = json!({"page": 2}).as_object().cloned().unwrap();
//! let request = normalize(
//!     "rules",
//!     ResourceOperation::Read,
//!     vec![Arg::from("a"), Arg::from("b"), Arg::from(options)],
//! )
//! .unwrap();
//!
//! assert_eq!(request.ids, vec!["a", "b"]);
//! assert!(request.payload.is_none());
//! assert_eq!(request.query["page"], json!(2));
//! ```

use serde_json::Value;

use crate::rest::errors::ArgumentError;
use crate::rest::path::ResourceOperation;
use crate::rest::value::{AttributeMap, WireValue};

/// Option keys recognised as query parameters.
pub const QUERY_KEYS: [&str; 6] = ["filter", "sort", "include", "fields", "page", "per_page"];

/// One positional call argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    /// A bare identifier.
    Id(String),
    /// An attribute map (or an options map).
    Map(AttributeMap),
}

impl From<&str> for Arg {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

impl From<String> for Arg {
    fn from(id: String) -> Self {
        Self::Id(id)
    }
}

impl From<uuid::Uuid> for Arg {
    fn from(id: uuid::Uuid) -> Self {
        Self::Id(id.to_wire())
    }
}

impl From<AttributeMap> for Arg {
    fn from(map: AttributeMap) -> Self {
        Self::Map(map)
    }
}

/// The attribute payload of a request.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Exactly one attribute map (singular wire shape).
    Single(AttributeMap),
    /// Two or more attribute maps (bulk wire shape).
    Bulk(Vec<AttributeMap>),
}

impl Payload {
    /// Builds a payload from maps; `None` when there are none.
    ///
    /// One map stays singular; two or more become bulk.
    #[must_use]
    pub fn from_maps(mut maps: Vec<AttributeMap>) -> Option<Self> {
        match maps.len() {
            0 => None,
            1 => maps.pop().map(Self::Single),
            _ => Some(Self::Bulk(maps)),
        }
    }

    /// Returns the maps as a slice.
    #[must_use]
    pub fn maps(&self) -> &[AttributeMap] {
        match self {
            Self::Single(map) => std::slice::from_ref(map),
            Self::Bulk(maps) => maps,
        }
    }

    /// Number of attribute maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.maps().len()
    }

    /// Returns `true` when the payload holds no maps.
    ///
    /// [`Payload::from_maps`] never builds one; only a hand-built
    /// `Payload::Bulk(vec![])` is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.maps().is_empty()
    }

    /// Returns `true` for the bulk shape.
    #[must_use]
    pub const fn is_bulk(&self) -> bool {
        matches!(self, Self::Bulk(_))
    }

    /// Converts the payload into a JSON object (single) or array (bulk).
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Single(map) => Value::Object(map),
            Self::Bulk(maps) => Value::Array(maps.into_iter().map(Value::Object).collect()),
        }
    }
}

/// The normalized `(ids, payload, query)` triple of one call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CanonicalRequest {
    /// Identifiers addressed by the call, in call order.
    pub ids: Vec<String>,
    /// The attribute payload, if any.
    pub payload: Option<Payload>,
    /// Query options.
    pub query: AttributeMap,
}

impl CanonicalRequest {
    /// A create request: attribute maps, no identifiers.
    #[must_use]
    pub fn create(maps: Vec<AttributeMap>) -> Self {
        Self {
            ids: Vec::new(),
            payload: Payload::from_maps(maps),
            query: AttributeMap::new(),
        }
    }

    /// A read request: zero or more identifiers plus options.
    #[must_use]
    pub fn read(ids: Vec<String>, query: Option<AttributeMap>) -> Self {
        Self {
            ids,
            payload: None,
            query: query.unwrap_or_default(),
        }
    }

    /// An update request with identifiers embedded in each map's `id`.
    ///
    /// Maps without a string `id` contribute no identifier; the update field
    /// rules report the missing id.
    #[must_use]
    pub fn update(maps: Vec<AttributeMap>) -> Self {
        let ids = maps
            .iter()
            .filter_map(|map| map.get("id").map(WireValue::to_wire))
            .filter(|id| !id.is_empty())
            .collect();
        Self {
            ids,
            payload: Payload::from_maps(maps),
            query: AttributeMap::new(),
        }
    }

    /// An update request with identifiers supplied separately.
    ///
    /// One map is applied to every identifier; otherwise maps pair with
    /// identifiers positionally. Each map receives its identifier as `id`.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::IdCountMismatch`] when several maps are given
    /// and their count differs from the identifier count.
    pub fn update_with_ids(
        operation: &str,
        ids: Vec<String>,
        maps: Vec<AttributeMap>,
    ) -> Result<Self, ArgumentError> {
        let paired: Vec<AttributeMap> = match maps.len() {
            1 => ids.iter().map(|id| with_id(&maps[0], id)).collect(),
            n if n == ids.len() => maps
                .iter()
                .zip(&ids)
                .map(|(map, id)| with_id(map, id))
                .collect(),
            n => {
                return Err(ArgumentError::IdCountMismatch {
                    operation: operation.to_string(),
                    ids: ids.len(),
                    maps: n,
                })
            }
        };
        Ok(Self {
            ids,
            payload: Payload::from_maps(paired),
            query: AttributeMap::new(),
        })
    }

    /// A delete request: identifiers only.
    #[must_use]
    pub fn delete(ids: Vec<String>) -> Self {
        Self {
            ids,
            payload: None,
            query: AttributeMap::new(),
        }
    }

    /// Returns the payload maps (empty when there is no payload).
    #[must_use]
    pub fn payload_maps(&self) -> &[AttributeMap] {
        self.payload.as_ref().map_or(&[], Payload::maps)
    }
}

/// Returns `true` when every key of a non-empty map is a query option key.
#[must_use]
pub fn is_options(map: &AttributeMap) -> bool {
    !map.is_empty() && map.keys().all(|key| QUERY_KEYS.contains(&key.as_str()))
}

/// Classifies positional arguments into a [`CanonicalRequest`].
///
/// `kind` is the resource kind name, used in error messages.
///
/// # Errors
///
/// Returns [`ArgumentError`] when the call shape does not fit the operation:
/// an identifier after a map, identifiers for a create, attribute data for a
/// read or delete, no attribute data for a create or update, or separately
/// supplied identifiers that cannot be paired with the maps.
pub fn normalize(
    kind: &str,
    operation: ResourceOperation,
    args: Vec<Arg>,
) -> Result<CanonicalRequest, ArgumentError> {
    let method = operation.method_name(kind);
    let mut ids = Vec::new();
    let mut maps = Vec::new();

    for (position, arg) in args.into_iter().enumerate() {
        match arg {
            Arg::Id(_) if !maps.is_empty() => {
                return Err(ArgumentError::UnexpectedIdentifier {
                    operation: method,
                    position,
                })
            }
            Arg::Id(id) => ids.push(id),
            Arg::Map(map) => maps.push(map),
        }
    }

    let trailing_options = maps.last().is_some_and(|last| {
        is_options(last) && (ids.is_empty() || operation == ResourceOperation::Read)
    });
    let query = if trailing_options {
        maps.pop().unwrap_or_default()
    } else {
        AttributeMap::new()
    };

    match operation {
        ResourceOperation::Create => {
            if !ids.is_empty() {
                return Err(ArgumentError::UnexpectedIds { operation: method });
            }
            if maps.is_empty() {
                return Err(ArgumentError::MissingAttributes { operation: method });
            }
            let mut request = CanonicalRequest::create(maps);
            request.query = query;
            Ok(request)
        }
        ResourceOperation::Read => {
            if maps.iter().any(|map| !map.is_empty()) {
                return Err(ArgumentError::UnexpectedAttributes { operation: method });
            }
            Ok(CanonicalRequest::read(ids, Some(query)))
        }
        ResourceOperation::Update => {
            if maps.is_empty() {
                return Err(ArgumentError::MissingAttributes { operation: method });
            }
            let mut request = if ids.is_empty() {
                CanonicalRequest::update(maps)
            } else {
                CanonicalRequest::update_with_ids(&method, ids, maps)?
            };
            request.query = query;
            Ok(request)
        }
        ResourceOperation::Delete => {
            if !maps.is_empty() || !query.is_empty() {
                return Err(ArgumentError::UnexpectedAttributes { operation: method });
            }
            Ok(CanonicalRequest::delete(ids))
        }
    }
}

fn with_id(map: &AttributeMap, id: &str) -> AttributeMap {
    let mut map = map.clone();
    map.insert("id".to_string(), Value::String(id.to_string()));
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> AttributeMap {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_leading_ids_are_collected_in_order() {
        let request = normalize(
            "rules",
            ResourceOperation::Delete,
            vec!["b".into(), "a".into(), "c".into()],
        )
        .unwrap();
        assert_eq!(request.ids, vec!["b", "a", "c"]);
        assert!(request.payload.is_none());
    }

    #[test]
    fn test_single_map_stays_single() {
        let request = normalize(
            "tags",
            ResourceOperation::Create,
            vec![map(json!({"name": "x"})).into()],
        )
        .unwrap();
        assert!(matches!(request.payload, Some(Payload::Single(_))));
    }

    #[test]
    fn test_two_maps_become_bulk() {
        let request = normalize(
            "tags",
            ResourceOperation::Create,
            vec![map(json!({"name": "x"})).into(), map(json!({"name": "y"})).into()],
        )
        .unwrap();
        let payload = request.payload.unwrap();
        assert!(payload.is_bulk());
        assert_eq!(payload.len(), 2);
        assert!(!payload.is_empty());
        assert!(Payload::Bulk(Vec::new()).is_empty());
    }

    #[test]
    fn test_options_map_without_ids_is_query() {
        let request = normalize(
            "statistics",
            ResourceOperation::Read,
            vec![map(json!({"filter": {"instance_name": "global"}})).into()],
        )
        .unwrap();
        assert!(request.ids.is_empty());
        assert_eq!(request.query["filter"], json!({"instance_name": "global"}));
    }

    #[test]
    fn test_read_rejects_attribute_data() {
        let result = normalize(
            "rules",
            ResourceOperation::Read,
            vec![map(json!({"name": "x"})).into()],
        );
        assert!(matches!(
            result,
            Err(ArgumentError::UnexpectedAttributes { operation }) if operation == "rules"
        ));
    }

    #[test]
    fn test_identifier_after_map_is_rejected() {
        let result = normalize(
            "contacts",
            ResourceOperation::Update,
            vec![map(json!({"name": "x"})).into(), "c1".into()],
        );
        assert!(matches!(
            result,
            Err(ArgumentError::UnexpectedIdentifier { position: 1, .. })
        ));
    }

    #[test]
    fn test_update_with_embedded_ids() {
        let request = normalize(
            "tags",
            ResourceOperation::Update,
            vec![
                map(json!({"id": "t1", "name": "x"})).into(),
                map(json!({"id": "t2", "name": "y"})).into(),
            ],
        )
        .unwrap();
        assert_eq!(request.ids, vec!["t1", "t2"]);
        assert_eq!(request.payload_maps().len(), 2);
    }

    #[test]
    fn test_update_with_separate_ids_applies_one_map_to_each() {
        let request = normalize(
            "contacts",
            ResourceOperation::Update,
            vec!["c1".into(), "c2".into(), map(json!({"timezone": "UTC"})).into()],
        )
        .unwrap();
        assert_eq!(request.ids, vec!["c1", "c2"]);
        let maps = request.payload_maps();
        assert_eq!(maps[0]["id"], json!("c1"));
        assert_eq!(maps[1]["id"], json!("c2"));
        assert_eq!(maps[1]["timezone"], json!("UTC"));
    }

    #[test]
    fn test_update_with_separate_ids_count_mismatch() {
        let result = normalize(
            "contacts",
            ResourceOperation::Update,
            vec![
                "c1".into(),
                map(json!({"name": "a"})).into(),
                map(json!({"name": "b"})).into(),
            ],
        );
        assert!(matches!(
            result,
            Err(ArgumentError::IdCountMismatch { ids: 1, maps: 2, .. })
        ));
    }

    #[test]
    fn test_create_rejects_ids_and_requires_maps() {
        assert!(matches!(
            normalize("rules", ResourceOperation::Create, vec!["x".into()]),
            Err(ArgumentError::UnexpectedIds { .. })
        ));
        assert!(matches!(
            normalize("rules", ResourceOperation::Create, vec![]),
            Err(ArgumentError::MissingAttributes { .. })
        ));
    }

    #[test]
    fn test_delete_rejects_maps() {
        let result = normalize(
            "rules",
            ResourceOperation::Delete,
            vec!["a".into(), map(json!({"page": 1})).into()],
        );
        assert!(matches!(
            result,
            Err(ArgumentError::UnexpectedAttributes { .. })
        ));
    }

    #[test]
    fn test_delete_with_no_ids_normalizes_to_empty_ids() {
        let request = normalize("rules", ResourceOperation::Delete, vec![]).unwrap();
        assert!(request.ids.is_empty());
    }

    #[test]
    fn test_is_options() {
        assert!(is_options(&map(json!({"page": 1, "per_page": 20}))));
        assert!(!is_options(&map(json!({"page": 1, "name": "x"}))));
        assert!(!is_options(&AttributeMap::new()));
    }

    #[test]
    fn test_uuid_arguments_are_hyphenated_ids() {
        let arg = Arg::from(uuid::Uuid::nil());
        assert_eq!(
            arg,
            Arg::Id("00000000-0000-0000-0000-000000000000".to_string())
        );
    }
}
