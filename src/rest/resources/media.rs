//! Media: the addresses (email, SMS, ...) a contact is notified through.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, Transport};
use crate::rest::client::Diner;
use crate::rest::errors::DinerError;
use crate::rest::resources::{BodyStyle, ResourceKind, ALL_OPERATIONS};
use crate::rest::validation::{CheckKind, FieldRule};
use crate::rest::value::AttributeMap;

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::optional("id", CheckKind::Uuid),
    FieldRule::required("transport", CheckKind::String),
    FieldRule::required("address", CheckKind::String),
    FieldRule::required("interval", CheckKind::PositiveInteger),
    FieldRule::optional("rollup_threshold", CheckKind::PositiveInteger),
    FieldRule::required("contact", CheckKind::SingularLinkUuid),
    FieldRule::optional("rules", CheckKind::MultipleLinkUuid),
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::required("id", CheckKind::Uuid),
    FieldRule::optional("address", CheckKind::String),
    FieldRule::optional("interval", CheckKind::PositiveInteger),
    FieldRule::optional("rollup_threshold", CheckKind::PositiveInteger),
    FieldRule::optional("rules", CheckKind::MultipleLinkUuid),
];

/// The `media` resource kind.
pub const MEDIA: ResourceKind = ResourceKind {
    name: "media",
    type_name: "medium",
    id_check: CheckKind::Uuid,
    update_method: HttpMethod::Put,
    operations: ALL_OPERATIONS,
    create_rules: CREATE_RULES,
    update_rules: UPDATE_RULES,
    body_style: BodyStyle::KindKey,
};

/// A notification medium belonging to one contact.
///
/// `transport` is fixed at creation; the remaining fields may be updated.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Medium {
    /// The medium id (a UUID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Delivery transport, e.g. `email`, `sms`, `slack`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,

    /// Transport-specific address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Seconds between repeated notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,

    /// Number of alerting checks at which notifications are rolled up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollup_threshold: Option<u64>,

    /// Id of the owning contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// Ids of linked rules.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
}

impl<T: Transport> Diner<T> {
    /// Creates one medium, or several in a bulk request.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if `transport`, `address`,
    /// `interval` or `contact` is missing or malformed.
    pub async fn create_media(&self, media: Vec<AttributeMap>) -> Result<Value, DinerError> {
        self.create(&MEDIA, media).await
    }

    /// Reads all media, one medium, or several by id.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn media(
        &self,
        ids: &[&str],
        options: Option<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.read(&MEDIA, ids, options).await
    }

    /// Updates media; each map carries its own `id`.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn update_media(&self, media: Vec<AttributeMap>) -> Result<bool, DinerError> {
        self.update(&MEDIA, media).await
    }

    /// Deletes one or more media.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn delete_media(&self, ids: &[&str]) -> Result<bool, DinerError> {
        self.delete(&MEDIA, ids).await
    }
}
