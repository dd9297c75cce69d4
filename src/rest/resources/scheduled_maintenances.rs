//! Scheduled maintenance windows, during which a check's notifications are
//! suppressed.
//!
//! Times are sent as ISO-8601 strings; build them with
//! [`time_value`](crate::rest::time_value).

use chrono::{DateTime, FixedOffset};
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
    FieldRule::required("start_time", CheckKind::Time),
    FieldRule::required("end_time", CheckKind::Time),
    FieldRule::optional("summary", CheckKind::String),
    FieldRule::optional("check", CheckKind::SingularLinkUuid),
];

const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::required("id", CheckKind::Uuid),
    FieldRule::optional("start_time", CheckKind::Time),
    FieldRule::optional("end_time", CheckKind::Time),
    FieldRule::optional("summary", CheckKind::String),
];

/// The `scheduled_maintenances` resource kind.
pub const SCHEDULED_MAINTENANCES: ResourceKind = ResourceKind {
    name: "scheduled_maintenances",
    type_name: "scheduled_maintenance",
    id_check: CheckKind::Uuid,
    update_method: HttpMethod::Patch,
    operations: ALL_OPERATIONS,
    create_rules: CREATE_RULES,
    update_rules: UPDATE_RULES,
    body_style: BodyStyle::KindKey,
};

/// A scheduled maintenance window.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ScheduledMaintenance {
    /// The window id (a UUID).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Id of the check the window applies to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
}

impl<T: Transport> Diner<T> {
    /// Creates one maintenance window, or several in a bulk request.
    ///
    /// # Errors
    ///
    /// Returns [`DinerError::Validation`] if `start_time` or `end_time` is
    /// missing or is not an ISO-8601 time.
    pub async fn create_scheduled_maintenances(
        &self,
        windows: Vec<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.create(&SCHEDULED_MAINTENANCES, windows).await
    }

    /// Reads all maintenance windows, one window, or several by id.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn scheduled_maintenances(
        &self,
        ids: &[&str],
        options: Option<AttributeMap>,
    ) -> Result<Value, DinerError> {
        self.read(&SCHEDULED_MAINTENANCES, ids, options).await
    }

    /// Updates maintenance windows; each map carries its own `id`.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn update_scheduled_maintenances(
        &self,
        windows: Vec<AttributeMap>,
    ) -> Result<bool, DinerError> {
        self.update(&SCHEDULED_MAINTENANCES, windows).await
    }

    /// Deletes one or more maintenance windows.
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn delete_scheduled_maintenances(&self, ids: &[&str]) -> Result<bool, DinerError> {
        self.delete(&SCHEDULED_MAINTENANCES, ids).await
    }
}
