//! Flapjack resource kinds.
//!
//! Each resource kind is described by a static [`ResourceKind`]: its wire
//! key, JSON-API type name, identifier check, update method, supported
//! operations and the field rules for create and update. The submodules pair
//! each kind with a typed model and the matching [`Diner`](crate::Diner)
//! methods:
//!
//! | kind | methods |
//! |---|---|
//! | [`CONTACTS`] | `create_contacts`, `contacts`, `update_contacts`, `delete_contacts` |
//! | [`MEDIA`] | `create_media`, `media`, `update_media`, `delete_media` |
//! | [`RULES`] | `create_rules`, `rules`, `update_rules`, `delete_rules` |
//! | [`TAGS`] | `create_tags`, `tags`, `update_tags`, `delete_tags` |
//! | [`SCHEDULED_MAINTENANCES`] | `create_scheduled_maintenances`, `scheduled_maintenances`, ... |
//! | [`STATISTICS`] | `statistics` (read-only) |
//!
//! Every kind shares the read option rules in [`READ_OPTION_RULES`].
//!
//! # Example
//!
//! ```rust,ignore
//! use flapjack_diner::rest::resources::{parse_as, Rule};
//!
//! let value = diner.rules(&["05983623-fcef-42da-af44-ed6990b500fa"], None).await?;
//! let rule: Rule = parse_as(value)?;
//! ```

mod contacts;
mod media;
mod rules;
mod scheduled_maintenances;
mod statistics;
mod tags;

pub use contacts::{Contact, CONTACTS};
pub use media::{Medium, MEDIA};
pub use rules::{Rule, RULES};
pub use scheduled_maintenances::{ScheduledMaintenance, SCHEDULED_MAINTENANCES};
pub use statistics::{Statistics, STATISTICS};
pub use tags::{Tag, TAGS};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::clients::HttpMethod;
use crate::rest::errors::DinerError;
use crate::rest::path::ResourceOperation;
use crate::rest::validation::{CheckKind, FieldRule};
use crate::rest::value::AttributeMap;

/// Option rules shared by every read operation.
pub const READ_OPTION_RULES: &[FieldRule] = &[
    FieldRule::optional("fields", CheckKind::StringOrArrayOfStrings),
    FieldRule::optional("sort", CheckKind::StringOrArrayOfStrings),
    FieldRule::optional("include", CheckKind::StringOrArrayOfStrings),
    FieldRule::optional("filter", CheckKind::Hash),
    FieldRule::optional("page", CheckKind::PositiveInteger),
    FieldRule::optional("per_page", CheckKind::PositiveInteger),
];

/// Operations supported by read/write kinds.
pub const ALL_OPERATIONS: &[ResourceOperation] = &[
    ResourceOperation::Create,
    ResourceOperation::Read,
    ResourceOperation::Update,
    ResourceOperation::Delete,
];

/// Static description of one resource kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResourceKind {
    /// Wire key and collection path segment, e.g. `rules`.
    pub name: &'static str,
    /// JSON-API type name, e.g. `rule`.
    pub type_name: &'static str,
    /// Check applied to identifiers passed to delete.
    pub id_check: CheckKind,
    /// Method used for updates (PUT or PATCH).
    pub update_method: HttpMethod,
    /// Operations the kind supports.
    pub operations: &'static [ResourceOperation],
    /// Field rules for create.
    pub create_rules: &'static [FieldRule],
    /// Field rules for update.
    pub update_rules: &'static [FieldRule],
    /// Shape of request and response documents.
    pub body_style: BodyStyle,
}

/// How a kind's attribute maps are laid out in request and response bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyStyle {
    /// Maps sit under the kind's wire key: `{"tags": {..}}` or `{"tags": [..]}`.
    #[default]
    KindKey,
    /// JSON-API resource objects under `data`:
    /// `{"data": {"type", "id", "attributes", "relationships"}}`.
    ///
    /// Fields declared with a link check go under `relationships`; the rest
    /// go under `attributes`. Resource objects in responses are flattened back
    /// into plain maps.
    JsonApi,
}

impl ResourceKind {
    /// Every known resource kind.
    pub const ALL: [&'static Self; 6] = [
        &CONTACTS,
        &MEDIA,
        &RULES,
        &TAGS,
        &SCHEDULED_MAINTENANCES,
        &STATISTICS,
    ];

    /// Looks up a kind by its wire key.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Self> {
        Self::ALL.into_iter().find(|kind| kind.name == name)
    }

    /// Returns `true` if the kind supports `operation`.
    #[must_use]
    pub fn supports(&self, operation: ResourceOperation) -> bool {
        self.operations.contains(&operation)
    }

    /// Returns the field rules applied to an operation's payload maps.
    #[must_use]
    pub const fn payload_rules(&self, operation: ResourceOperation) -> &'static [FieldRule] {
        match operation {
            ResourceOperation::Create => self.create_rules,
            ResourceOperation::Update => self.update_rules,
            ResourceOperation::Read | ResourceOperation::Delete => &[],
        }
    }
}

/// Returns the JSON-API type of the resource a link field points at.
///
/// Plural link names resolve through the known kinds (`media` is `medium`);
/// singular names such as `contact` or `check` are already type names.
#[must_use]
pub fn link_type(field: &str) -> &str {
    ResourceKind::by_name(field).map_or(field, |kind| kind.type_name)
}

/// Deserializes a success value into a typed model (or `Vec` of models).
///
/// # Errors
///
/// Returns [`DinerError::Decode`] if the value does not match `M`.
pub fn parse_as<M: DeserializeOwned>(value: Value) -> Result<M, DinerError> {
    Ok(serde_json::from_value(value)?)
}

/// Serializes a typed model into an attribute map.
///
/// Fields left as `None` are omitted.
///
/// # Errors
///
/// Returns [`DinerError::Decode`] if the model does not serialize to a JSON
/// object.
pub fn to_attributes<M: Serialize>(model: &M) -> Result<AttributeMap, DinerError> {
    match serde_json::to_value(model)? {
        Value::Object(map) => Ok(map),
        other => Err(DinerError::Decode(serde::de::Error::custom(format!(
            "expected an object, found {other}"
        )))),
    }
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceKind>();
};
