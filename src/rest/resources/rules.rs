//! Notification rules: which media a contact is notified on, for which tags
//! and conditions.
//!
//! Rule ids are UUIDs. Updates use PATCH.

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
    FieldRule::optional("name", CheckKind::String),
    FieldRule::optional("conditions_list", CheckKind::String),
    FieldRule::optional("is_blackhole", CheckKind::Boolean),
    FieldRule::required("contact", CheckKind::SingularLinkUuid),
    FieldRule::optional("media", CheckKind::MultipleLinkUuid),
    FieldRule::optional("tags", CheckKind::MultipleLink),
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::required("id", CheckKind::Uuid),
    FieldRule::optional("name", CheckKind::String),
    FieldRule::optional("conditions_list", CheckKind::String),
    FieldRule::optional("is_blackhole", CheckKind::Boolean),
    FieldRule::optional("media", CheckKind::MultipleLinkUuid),
    FieldRule::optional("tags", CheckKind::MultipleLink),
];

/// The `rules` resource kind.
pub const RULES: ResourceKind = ResourceKind {
    name: "rules",
    type_name: "rule",
    id_check: CheckKind::Uuid,
    update_method: HttpMethod::Patch,
    operations: ALL_OPERATIONS,
    create_rules: CREATE_RULES,
    update_rules: UPDATE_RULES,
    body_style: BodyStyle::JsonApi,
};

/// A notification rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Rule {
    /// The rule id (a UUID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Comma-separated check conditions, e.g. `critical,warning`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions_list: Option<String>,

    /// When `true`, matching notifications are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_blackhole: Option<bool>,

    /// Id of the owning contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,

    /// Ids of linked media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<String>>,

    /// Names of linked tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl<T: Transport> Diner<T> {
    /// Creates one rule, or several in a bulk request.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if `contact` is missing or is not a
    /// single UUID.
    pub async fn create_rules(&self, rules: Vec<AttributeMap>) -> Result<Value, DinerError> {
        self.create(&RULES, rules).await
    }

    /// Reads all rules, one rule, or several by id.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn rules(
        &self,
        ids: &[&str],
        options: Option<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.read(&RULES, ids, options).await
    }

    /// Updates rules; each map carries its own `id`.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn update_rules(&self, rules: Vec<AttributeMap>) -> Result<bool, DinerError> {
        self.update(&RULES, rules).await
    }

    /// Deletes one or more rules.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn delete_rules(&self, ids: &[&str]) -> Result<bool, DinerError> {
        self.delete(&RULES, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::validation::validate;
    use serde_json::json;

    #[test]
    fn test_tags_accept_free_form_names() {
        let map = json!({
            "contact": "05983623-fcef-42da-af44-ed6990b500fa",
            "tags": ["database", "web server"],
            "is_blackhole": false
        });
        assert!(validate([map.as_object().unwrap()], RULES.create_rules).is_empty());
    }

    #[test]
    fn test_media_links_must_be_uuids() {
        let map = json!({"id": "05983623-fcef-42da-af44-ed6990b500fa", "media": ["email-1"]});
        let violations = validate([map.as_object().unwrap()], RULES.update_rules);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_name, "media");
    }

    #[test]
    fn test_rule_round_trips_through_attributes() {
        let rule = Rule {
            name: Some("r1".to_string()),
            contact: Some("05983623-fcef-42da-af44-ed6990b500fa".to_string()),
            ..Rule::default()
        };
        let map = crate::rest::resources::to_attributes(&rule).unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"name": "r1", "contact": "05983623-fcef-42da-af44-ed6990b500fa"})
        );
    }
}
