//! Contacts: the people notifications are sent to.
//!
//! Contact ids are free-form strings. Updates use PUT.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, Transport};
use crate::rest::client::Diner;
use crate::rest::errors::DinerError;
use crate::rest::resources::{BodyStyle, ResourceKind, ALL_OPERATIONS};
use crate::rest::validation::{CheckKind, FieldRule};
use crate::rest::value::AttributeMap;

const CREATE_RULES: &[FieldRule] = &[
    FieldRule::optional("id", CheckKind::String),
    FieldRule::required("name", CheckKind::String),
    FieldRule::optional("timezone", CheckKind::String),
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::required("id", CheckKind::String),
    FieldRule::optional("name", CheckKind::String),
    FieldRule::optional("timezone", CheckKind::String),
];

/// The `contacts` resource kind.
pub const CONTACTS: ResourceKind = ResourceKind {
    name: "contacts",
    type_name: "contact",
    id_check: CheckKind::String,
    update_method: HttpMethod::Put,
    operations: ALL_OPERATIONS,
    create_rules: CREATE_RULES,
    update_rules: UPDATE_RULES,
    body_style: BodyStyle::KindKey,
};

/// A contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Contact {
    /// The contact id; assigned by the service when omitted on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name. Required on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// IANA timezone name, e.g. `Australia/Perth`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl<T: Transport> Diner<T> {
    /// Creates one contact, or several in a bulk request.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if a map has no `name`.
    pub async fn create_contacts(&self, contacts: Vec<AttributeMap>) -> Result<Value, DinerError> {
        self.create(&CONTACTS, contacts).await
    }

    /// Reads all contacts, one contact, or several by id.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn contacts(
        &self,
        ids: &[&str],
        options: Option<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.read(&CONTACTS, ids, options).await
    }

    /// Updates contacts; each map carries its own `id`.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if a map has no `id`.
    pub async fn update_contacts(&self, contacts: Vec<AttributeMap>) -> Result<bool, DinerError> {
        self.update(&CONTACTS, contacts).await
    }

    /// Deletes one or more contacts.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if `ids` is empty.
    pub async fn delete_contacts(&self, ids: &[&str]) -> Result<bool, DinerError> {
        self.delete(&CONTACTS, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::validation::validate;
    use serde_json::json;

    #[test]
    fn test_create_requires_name() {
        let map = json!({"timezone": "UTC"});
        let violations = validate([map.as_object().unwrap()], CONTACTS.create_rules);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_name, "name");
        assert_eq!(violations[0].reason, "is required");
    }

    #[test]
    fn test_contact_deserializes_with_unknown_fields() {
        let contact: Contact = serde_json::from_value(json!({
            "id": "c362",
            "name": "Jim Smith",
            "timezone": "UTC",
            "links": {"media": []}
        }))
        .unwrap();
        assert_eq!(contact.name.as_deref(), Some("Jim Smith"));
    }
}
