//! Tags: free-form labels that group checks for rule matching.
//!
//! Tag ids are free-form strings. Updates use PUT.

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
    FieldRule::optional("rules", CheckKind::MultipleLinkUuid),
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::required("id", CheckKind::String),
    FieldRule::optional("name", CheckKind::String),
    FieldRule::optional("rules", CheckKind::MultipleLinkUuid),
];

/// The `tags` resource kind.
pub const TAGS: ResourceKind = ResourceKind {
    name: "tags",
    type_name: "tag",
    id_check: CheckKind::String,
    update_method: HttpMethod::Put,
    operations: ALL_OPERATIONS,
    create_rules: CREATE_RULES,
    update_rules: UPDATE_RULES,
    body_style: BodyStyle::KindKey,
};

/// A tag.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Ids of rules matching this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
}

impl<T: Transport> Diner<T> {
    /// Creates one tag, or several in a bulk request.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if a map has no `name`.
    pub async fn create_tags(&self, tags: Vec<AttributeMap>) -> Result<Value, DinerError> {
        self.create(&TAGS, tags).await
    }

    /// Reads all tags, one tag, or several by id.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn tags(
        &self,
        ids: &[&str],
        options: Option<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.read(&TAGS, ids, options).await
    }

    /// Updates tags; each map carries its own `id`.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn update_tags(&self, tags: Vec<AttributeMap>) -> Result<bool, DinerError> {
        self.update(&TAGS, tags).await
    }

    /// Deletes one or more tags.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn delete_tags(&self, ids: &[&str]) -> Result<bool, DinerError> {
        self.delete(&TAGS, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::validation::validate;
    use serde_json::json;

    #[test]
    fn test_update_requires_id_in_every_map() {
        let first = json!({"id": "t1", "name": "x"});
        let second = json!({"name": "y"});
        let violations = validate(
            [first.as_object().unwrap(), second.as_object().unwrap()],
            TAGS.update_rules,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field_name, "id");
        assert_eq!(violations[0].index, 1);
    }
}
