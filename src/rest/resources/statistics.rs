//! Event statistics reported by Flapjack instances.
//!
//! Statistics are read-only and returned as JSON-API resource objects under
//! a top-level `data` key; the client flattens them into plain maps.
//!
//! ```rust,ignore
//! use flapjack_diner::rest::resources::{parse_as, Statistics};
//! use serde_json::json;
//!
//! let filter = json!({"filter": {"instance_name": "global"}});
//! let value = diner.statistics(filter.as_object().cloned()).await?;
//! let stats: Vec<Statistics> = parse_as(value)?;
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{HttpMethod, Transport};
use crate::rest::client::Diner;
use crate::rest::errors::DinerError;
use crate::rest::path::ResourceOperation;
use crate::rest::resources::{BodyStyle, ResourceKind};
use crate::rest::validation::CheckKind;
use crate::rest::value::AttributeMap;

/// The `statistics` resource kind (read-only).
pub const STATISTICS: ResourceKind = ResourceKind {
    name: "statistics",
    type_name: "statistic",
    id_check: CheckKind::String,
    update_method: HttpMethod::Put,
    operations: &[ResourceOperation::Read],
    create_rules: &[],
    update_rules: &[],
    body_style: BodyStyle::JsonApi,
};

/// Event counters for one instance (or `global`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Statistics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Always `statistic` when present.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<FixedOffset>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_events: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ok_events: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_events: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_events: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub invalid_events: Option<u64>,
}

impl<T: Transport> Diner<T> {
    /// Reads statistics, optionally filtered (e.g. by `instance_name`).
    ///
    /// # Errors
    ///
    /// See [`DinerError`].
    pub async fn statistics(&self, options: Option<AttributeMap>) -> Result<Value, DinerError> {
        self.read(&STATISTICS, &[], options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::resources::parse_as;
    use serde_json::json;

    #[test]
    fn test_parses_flattened_statistics() {
        let stats: Vec<Statistics> = parse_as(json!([{
            "type": "statistic",
            "id": "global",
            "instance_name": "global",
            "created_at": "2015-03-01T00:00:00+00:00",
            "all_events": 12,
            "ok_events": 9
        }]))
        .unwrap();
        assert_eq!(stats[0].type_name.as_deref(), Some("statistic"));
        assert_eq!(stats[0].all_events, Some(12));
        assert_eq!(stats[0].failure_events, None);
        assert!(stats[0].created_at.is_some());
    }
}
