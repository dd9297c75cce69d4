//! Integration tests for the reqwest-backed transport.
//!
//! These tests run `HttpTransport` and `Diner` against a local mock server
//! and verify methods, paths, headers, and bodies on the wire.

use flapjack_diner::{
    BaseUrl, Diner, DinerConfig, DinerError, HttpMethod, HttpTransport, Transport, TransportError,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JSON_API: &str = "application/vnd.api+json";
const JSON_API_BULK: &str = "application/vnd.api+json; ext=bulk";

fn diner_for(server: &MockServer) -> Diner {
    let config = DinerConfig::builder()
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap();
    Diner::new(config).unwrap()
}

fn json_api_response(status: u16, body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(
        body.to_string(),
        "application/vnd.api+json; supported-ext=bulk; charset=utf-8",
    )
}

// ============================================================================
// HttpTransport
// ============================================================================

#[tokio::test]
async fn test_transport_returns_error_statuses_as_responses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rules/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .perform(
            HttpMethod::Get,
            &format!("{}/rules/missing", mock_server.uri()),
            &[],
            None,
        )
        .await
        .unwrap();

    assert_eq!(response.code, 404);
    assert_eq!(response.reason.as_deref(), Some("Not Found"));
    assert_eq!(response.body, "not here");
}

#[tokio::test]
async fn test_transport_sends_body_on_delete() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tags"))
        .and(header("content-type", JSON_API_BULK))
        .and(body_string(r#"{"data":[]}"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let headers = vec![("Content-Type".to_string(), JSON_API_BULK.to_string())];
    let response = transport
        .perform(
            HttpMethod::Delete,
            &format!("{}/tags", mock_server.uri()),
            &headers,
            Some(r#"{"data":[]}"#),
        )
        .await
        .unwrap();

    assert_eq!(response.code, 204);
    assert!(response.is_body_empty());
}

#[tokio::test]
async fn test_transport_lowercases_response_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/statistics"))
        .respond_with(json_api_response(200, json!({"data": []})))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .perform(
            HttpMethod::Get,
            &format!("{}/statistics", mock_server.uri()),
            &[],
            None,
        )
        .await
        .unwrap();

    assert!(response.headers.contains_key("content-type"));
    assert_eq!(response.media_type(), Some(JSON_API));
}

#[tokio::test]
async fn test_invalid_header_name_is_rejected() {
    let transport = HttpTransport::new().unwrap();
    let headers = vec![("bad header".to_string(), "x".to_string())];

    let result = transport
        .perform(HttpMethod::Get, "http://127.0.0.1:9/rules", &headers, None)
        .await;

    assert!(matches!(
        result,
        Err(TransportError::InvalidHeader { name }) if name == "bad header"
    ));
}

#[tokio::test]
async fn test_connection_failure_propagates_as_transport_error() {
    // Bind and drop a listener to get a port nothing is listening on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = DinerConfig::builder()
        .base_url(BaseUrl::new(format!("127.0.0.1:{port}")).unwrap())
        .build()
        .unwrap();
    let diner = Diner::new(config).unwrap();

    let result = diner.tags(&[], None).await;

    assert!(matches!(
        result,
        Err(DinerError::Transport(TransportError::Network(_)))
    ));
    assert!(diner.last_error().is_none());
}

// ============================================================================
// Diner over HTTP
// ============================================================================

#[tokio::test]
async fn test_create_tag_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tags"))
        .and(header("content-type", JSON_API))
        .and(body_json(json!({"tags": {"name": "database"}})))
        .respond_with(json_api_response(201, json!({"tags": {"id": "database", "name": "database"}})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let diner = diner_for(&mock_server);
    let created = diner
        .create_tags(vec![json!({"name": "database"}).as_object().cloned().unwrap()])
        .await
        .unwrap();

    assert_eq!(created, json!({"id": "database", "name": "database"}));
}

#[tokio::test]
async fn test_bulk_rule_update_patches_collection() {
    let mock_server = MockServer::start().await;
    let first = "05983623-fcef-42da-af44-ed6990b500fa";
    let second = "20f182fc-6e32-4794-9007-97366d162c51";

    Mock::given(method("PATCH"))
        .and(path("/rules"))
        .and(header("content-type", JSON_API_BULK))
        .and(body_json(json!({"data": [
            {"type": "rule", "id": first, "attributes": {"is_blackhole": true}},
            {"type": "rule", "id": second, "attributes": {"is_blackhole": true}}
        ]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let diner = diner_for(&mock_server);
    let updated = diner
        .update_rules(vec![
            json!({"id": first, "is_blackhole": true}).as_object().cloned().unwrap(),
            json!({"id": second, "is_blackhole": true}).as_object().cloned().unwrap(),
        ])
        .await
        .unwrap();

    assert!(updated);
}

#[tokio::test]
async fn test_multi_id_read_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/contacts"))
        .and(query_param("filter[]", "id:c1|c2"))
        .and(header("accept", JSON_API))
        .respond_with(json_api_response(
            200,
            json!({"contacts": [{"id": "c1"}, {"id": "c2"}]}),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let diner = diner_for(&mock_server);
    let contacts = diner.contacts(&["c1", "c2"], None).await.unwrap();

    assert_eq!(contacts.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_bulk_delete_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/tags"))
        .and(header("content-type", JSON_API_BULK))
        .and(body_json(json!({"data": [
            {"type": "tag", "id": "a"},
            {"type": "tag", "id": "b"}
        ]})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let diner = diner_for(&mock_server);
    assert!(diner.delete_tags(&["a", "b"]).await.unwrap());
}

#[tokio::test]
async fn test_server_error_over_http_sets_last_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rules/id-missing"))
        .respond_with(json_api_response(
            404,
            json!({"errors": [{"status": "404", "detail": "could not find Rule record, id: 'id-missing'"}]}),
        ))
        .mount(&mock_server)
        .await;

    let diner = diner_for(&mock_server);
    let result = diner.rules(&["id-missing"], None).await;

    assert!(matches!(result, Err(DinerError::Server(_))));
    let last = diner.last_error().unwrap();
    assert_eq!(last.status_code, 404);
    assert_eq!(
        serde_json::to_value(&last.errors).unwrap(),
        json!([{"status": "404", "detail": "could not find Rule record, id: 'id-missing'"}])
    );
}

#[test]
fn test_local_validation_needs_no_server() {
    let config = DinerConfig::builder()
        .base_url(BaseUrl::new("localhost:9").unwrap())
        .build()
        .unwrap();
    let diner = Diner::new(config).unwrap();

    let result = tokio_test::block_on(diner.delete_scheduled_maintenances(&[]));

    assert!(matches!(result, Err(DinerError::Validation(_))));
    assert!(diner.last_error().is_none());
}
