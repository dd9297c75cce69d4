//! Request pipeline.
//!
//! Turns a [`CanonicalRequest`] into an [`HttpRequest`] (path, query string,
//! body and content type), and performs it through a [`Transport`].
//!
//! | operation | ids / maps | method | path | body |
//! |---|---|---|---|---|
//! | create | 1 map | POST | `/kind` | `{"kind": {..}}` |
//! | create | n maps | POST | `/kind` | `{"kind": [..]}` (bulk) |
//! | read | 0 ids | GET | `/kind` | |
//! | read | 1 id | GET | `/kind/id` | |
//! | read | n ids | GET | `/kind?filter[]=id:a\|b` | |
//! | update | 1 map | PUT/PATCH | `/kind/id` | `{"kind": {..}}` |
//! | update | n maps | PUT/PATCH | `/kind` | `{"kind": [..]}` (bulk) |
//! | delete | 1 id | DELETE | `/kind/id` | |
//! | delete | n ids | DELETE | `/kind` | `{"data": [{"type", "id"}]}` (bulk) |
//!
//! Kinds with [`BodyStyle::JsonApi`] send resource objects under `data`
//! instead of the kind key: `{"data": {"type", "id", "attributes",
//! "relationships"}}`, or a sequence of them for bulk requests. Query options
//! given to a create or update are encoded the same way as for a read.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::clients::logging::{request_line, response_body_line, response_code_line};
use crate::clients::{
    ContentType, HttpRequest, HttpResponse, RequestLogger, Transport, TransportError,
};
use crate::config::BaseUrl;
use crate::rest::arguments::{CanonicalRequest, Payload};
use crate::rest::errors::{ArgumentError, DinerError};
use crate::rest::path::{collection_path, member_path, ResourceOperation};
use crate::rest::resources::{link_type, BodyStyle, ResourceKind};
use crate::rest::response::ParsedBody;
use crate::rest::validation::FieldRule;
use crate::rest::value::{AttributeMap, WireValue};

/// Separator between identifiers (and values) inside one filter entry.
pub const FILTER_VALUE_SEPARATOR: &str = "|";

/// Builds the percent-encoded query string for a read.
///
/// When `ids` holds two or more identifiers, an id-membership filter
/// (`filter[]=id:a|b`) is emitted ahead of any other filter entries. Keys are
/// emitted in sorted order so equal inputs always produce equal strings.
#[must_use]
pub fn query_string(ids: &[String], query: &AttributeMap) -> String {
    let id_filter = (ids.len() > 1).then(|| format!("id:{}", ids.join(FILTER_VALUE_SEPARATOR)));

    let mut keys: Vec<&str> = query.keys().map(String::as_str).collect();
    if id_filter.is_some() && !query.contains_key("filter") {
        keys.push("filter");
    }
    keys.sort_unstable();

    let mut pairs: Vec<(String, String)> = Vec::new();
    for key in keys {
        if key == "filter" {
            if let Some(id_filter) = &id_filter {
                pairs.push(("filter[]".to_string(), id_filter.clone()));
            }
            if let Some(filter) = query.get("filter") {
                push_filter_pairs(filter, &mut pairs);
            }
            continue;
        }
        match query.get(key) {
            Some(Value::Object(nested)) => {
                let mut nested_keys: Vec<&String> = nested.keys().collect();
                nested_keys.sort_unstable();
                for nested_key in nested_keys {
                    pairs.push((format!("{key}[{nested_key}]"), nested[nested_key].to_wire()));
                }
            }
            Some(value) => pairs.push((key.to_string(), value.to_wire())),
            None => {}
        }
    }

    pairs
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn push_filter_pairs(filter: &Value, pairs: &mut Vec<(String, String)>) {
    match filter {
        Value::Object(entries) => {
            let mut names: Vec<&String> = entries.keys().collect();
            names.sort_unstable();
            for name in names {
                let value = match &entries[name] {
                    Value::Array(items) => items
                        .iter()
                        .map(WireValue::to_wire)
                        .collect::<Vec<_>>()
                        .join(FILTER_VALUE_SEPARATOR),
                    other => other.to_wire(),
                };
                pairs.push(("filter[]".to_string(), format!("{name}:{value}")));
            }
        }
        Value::Array(entries) => {
            for entry in entries {
                pairs.push(("filter[]".to_string(), entry.to_wire()));
            }
        }
        Value::Null => {}
        other => pairs.push(("filter[]".to_string(), other.to_wire())),
    }
}

/// Builds the request descriptor for one operation on a resource kind.
///
/// # Errors
///
/// Returns [`DinerError::Arguments`] when a create or update has no payload,
/// or an update's identifiers do not line up with its maps.
pub fn build_request(
    kind: &ResourceKind,
    operation: ResourceOperation,
    request: &CanonicalRequest,
) -> Result<HttpRequest, DinerError> {
    let ids = &request.ids;
    let method_name = operation.method_name(kind.name);

    let http_request = match operation {
        ResourceOperation::Read => {
            let (path, query) = match ids.as_slice() {
                [id] => (member_path(kind.name, id), query_string(&[], &request.query)),
                _ => (collection_path(kind.name), query_string(ids, &request.query)),
            };
            HttpRequest::builder(operation.default_http_method(), path)
                .query(query)
                .build()?
        }
        ResourceOperation::Create => {
            let payload = request
                .payload
                .clone()
                .ok_or(ArgumentError::MissingAttributes {
                    operation: method_name,
                })?;
            let content_type = ContentType::for_count(payload.len());
            let body = payload_body(kind, operation, payload)?;
            HttpRequest::builder(operation.default_http_method(), collection_path(kind.name))
                .query(query_string(&[], &request.query))
                .body(body)
                .content_type(content_type)
                .build()?
        }
        ResourceOperation::Update => {
            let payload = request
                .payload
                .clone()
                .ok_or_else(|| ArgumentError::MissingAttributes {
                    operation: method_name.clone(),
                })?;
            if ids.len() != payload.len() {
                return Err(ArgumentError::IdCountMismatch {
                    operation: method_name,
                    ids: ids.len(),
                    maps: payload.len(),
                }
                .into());
            }
            let content_type = ContentType::for_count(payload.len());
            let path = match ids.as_slice() {
                [id] => member_path(kind.name, id),
                _ => collection_path(kind.name),
            };
            let body = payload_body(kind, operation, payload)?;
            HttpRequest::builder(kind.update_method, path)
                .query(query_string(&[], &request.query))
                .body(body)
                .content_type(content_type)
                .build()?
        }
        ResourceOperation::Delete => match ids.as_slice() {
            [id] => HttpRequest::builder(operation.default_http_method(), member_path(kind.name, id))
                .build()?,
            _ => {
                let references: Vec<Value> = ids
                    .iter()
                    .map(|id| json!({"type": kind.type_name, "id": id}))
                    .collect();
                let body = serde_json::to_string(&json!({ "data": references }))?;
                HttpRequest::builder(operation.default_http_method(), collection_path(kind.name))
                    .body(body)
                    .content_type(ContentType::JsonApiBulk)
                    .build()?
            }
        },
    };

    tracing::debug!(
        resource = kind.name,
        operation = operation.as_str(),
        method = %http_request.http_method,
        target = %http_request.target(),
        "built request"
    );

    Ok(http_request)
}

fn payload_body(
    kind: &ResourceKind,
    operation: ResourceOperation,
    payload: Payload,
) -> Result<String, serde_json::Error> {
    match kind.body_style {
        BodyStyle::KindKey => wrap(kind.name, payload.into_value()),
        BodyStyle::JsonApi => {
            let rules = kind.payload_rules(operation);
            let data = match payload {
                Payload::Single(map) => resource_object(kind.type_name, rules, map),
                Payload::Bulk(maps) => Value::Array(
                    maps.into_iter()
                        .map(|map| resource_object(kind.type_name, rules, map))
                        .collect(),
                ),
            };
            wrap("data", data)
        }
    }
}

/// Lays out one attribute map as a JSON-API resource object.
///
/// `id` stays at the top level. Fields whose rule is a link check become
/// relationships holding `{type, id}` linkage; every other field is an
/// attribute.
#[must_use]
pub fn resource_object(type_name: &str, rules: &[FieldRule], map: AttributeMap) -> Value {
    let mut object = AttributeMap::new();
    object.insert("type".to_string(), Value::String(type_name.to_string()));
    let mut attributes = AttributeMap::new();
    let mut relationships = AttributeMap::new();

    for (field, value) in map {
        let is_link = rules
            .iter()
            .any(|rule| rule.field_name == field && rule.check_kind.is_link());
        if field == "id" {
            object.insert(field, value);
        } else if is_link {
            let data = linkage(link_type(&field), value);
            relationships.insert(field, json!({ "data": data }));
        } else {
            attributes.insert(field, value);
        }
    }

    object.insert("attributes".to_string(), Value::Object(attributes));
    if !relationships.is_empty() {
        object.insert("relationships".to_string(), Value::Object(relationships));
    }
    Value::Object(object)
}

fn linkage(type_name: &str, value: Value) -> Value {
    match value {
        Value::Array(ids) => Value::Array(
            ids.into_iter()
                .map(|id| linkage(type_name, id))
                .collect(),
        ),
        Value::Null => Value::Null,
        id => json!({"type": type_name, "id": id}),
    }
}

fn wrap(key: &str, value: Value) -> Result<String, serde_json::Error> {
    let mut body = AttributeMap::new();
    body.insert(key.to_string(), value);
    serde_json::to_string(&Value::Object(body))
}

/// Performs a request and returns its status and parsed body.
///
/// Trace lines go to `logger` when one is configured.
///
/// # Errors
///
/// Returns [`TransportError`] when the round trip cannot be completed.
pub async fn send<T: Transport>(
    transport: &T,
    base_url: &BaseUrl,
    logger: Option<&Arc<dyn RequestLogger>>,
    request: &HttpRequest,
) -> Result<(u16, ParsedBody), TransportError> {
    let url = base_url.join(&request.path, request.query.as_deref());

    let mut headers = vec![("Accept".to_string(), ContentType::MEDIA_TYPE.to_string())];
    if let Some(content_type) = request.content_type {
        headers.push((
            "Content-Type".to_string(),
            content_type.as_header_value().to_string(),
        ));
    }

    if let Some(logger) = logger {
        logger.log(&request_line(request.http_method.as_str(), &url));
        if let Some(body) = &request.body {
            logger.log(&format!("  {body}"));
        }
    }

    let response = transport
        .perform(request.http_method, &url, &headers, request.body.as_deref())
        .await?;

    if let Some(logger) = logger {
        log_response(&**logger, &response);
    }

    if !response.is_body_empty() && response.media_type() != Some(ContentType::MEDIA_TYPE) {
        tracing::debug!(
            status = response.code,
            media_type = response.media_type().unwrap_or_default(),
            "response is not a JSON-API document"
        );
    }

    Ok((response.code, ParsedBody::parse(&response.body)))
}

fn log_response(logger: &dyn RequestLogger, response: &HttpResponse) {
    logger.log(&response_code_line(response.code, response.reason.as_deref()));
    if !response.is_body_empty() {
        logger.log(&response_body_line(&response.body));
    }
}
