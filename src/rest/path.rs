//! Resource operations and path building.
//!
//! Every resource kind is addressed through two path shapes:
//! - the collection path `/<kind>` (create, list, multi-id read, bulk update/delete)
//! - the member path `/<kind>/<id>` (single-id read, update, delete)
//!
//! # Example
//!
//! ```rust
//! use flapjack_diner::rest::{collection_path, member_path, ResourceOperation};
//! use flapjack_diner::HttpMethod;
//!
//! assert_eq!(collection_path("rules"), "/rules");
//! assert_eq!(member_path("tags", "web server"), "/tags/web%20server");
//! assert_eq!(ResourceOperation::Create.default_http_method(), HttpMethod::Post);
//! ```

use crate::clients::HttpMethod;

/// Operations that can be performed on a resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create one or more resources (POST /kind).
    Create,
    /// Read a collection, one resource, or several resources by id.
    Read,
    /// Update one or more resources (PUT or PATCH).
    Update,
    /// Delete one or more resources (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    ///
    /// Updates may be overridden per resource kind (PUT or PATCH).
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Create => HttpMethod::Post,
            Self::Read => HttpMethod::Get,
            Self::Update => HttpMethod::Put,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "read",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Returns the client method name for a resource kind, e.g. `create_rules`.
    #[must_use]
    pub fn method_name(&self, kind: &str) -> String {
        match self {
            Self::Read => kind.to_string(),
            _ => format!("{}_{kind}", self.as_str()),
        }
    }
}

/// Builds the collection path for a resource kind.
#[must_use]
pub fn collection_path(kind: &str) -> String {
    format!("/{kind}")
}

/// Builds the member path for one identifier, percent-encoding the identifier.
#[must_use]
pub fn member_path(kind: &str, id: &str) -> String {
    format!("/{kind}/{}", urlencoding::encode(id))
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_http_methods() {
        assert_eq!(ResourceOperation::Create.default_http_method(), HttpMethod::Post);
        assert_eq!(ResourceOperation::Read.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Update.default_http_method(), HttpMethod::Put);
        assert_eq!(ResourceOperation::Delete.default_http_method(), HttpMethod::Delete);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(ResourceOperation::Create.method_name("rules"), "create_rules");
        assert_eq!(ResourceOperation::Read.method_name("rules"), "rules");
        assert_eq!(ResourceOperation::Delete.method_name("tags"), "delete_tags");
    }

    #[test]
    fn test_member_path_keeps_uuid_verbatim() {
        assert_eq!(
            member_path("rules", "05983623-fcef-42da-af44-ed6990b500fa"),
            "/rules/05983623-fcef-42da-af44-ed6990b500fa"
        );
    }

    #[test]
    fn test_member_path_encodes_reserved_characters() {
        assert_eq!(member_path("tags", "a/b"), "/tags/a%2Fb");
    }
}
