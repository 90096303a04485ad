// Integration tests for `ApiClient` using wiremock.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use almoxa_api::entities::items::ItemDto;
use almoxa_api::{ApiClient, Error, ParamMap, RequestContext, SessionHooks};

// ── Helpers ─────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingHooks {
    unauthenticated: AtomicUsize,
    denied: Mutex<Vec<String>>,
}

impl SessionHooks for RecordingHooks {
    fn on_unauthenticated(&self) {
        self.unauthenticated.fetch_add(1, Ordering::SeqCst);
    }

    fn on_access_denied(&self, message: &str) {
        self.denied.lock().unwrap().push(message.to_owned());
    }
}

fn tenant_context(tenant: &str) -> RequestContext {
    RequestContext::authenticated(SecretString::from("sekret")).with_tenant(tenant)
}

async fn setup() -> (MockServer, ApiClient, Arc<RecordingHooks>) {
    let server = MockServer::start().await;
    let hooks = Arc::new(RecordingHooks::default());
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new())
        .unwrap()
        .with_hooks(Arc::clone(&hooks) as Arc<dyn SessionHooks>);
    client.set_context(tenant_context("42"));
    (server, client, hooks)
}

fn params(value: serde_json::Value) -> ParamMap {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected object, got {other:?}"),
    }
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_tenant_placeholder_is_substituted() {
    let (server, client, _) = setup().await;

    let body = json!({
        "data": [
            { "type": "items", "id": "1", "attributes": { "description": "Drill" } },
            { "type": "items", "id": "2", "attributes": { "description": "Hammer" } },
        ],
    });

    Mock::given(method("GET"))
        .and(path("/tenancies/42/items"))
        .and(header("authorization", "Bearer sekret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let rows = client.list_items(ParamMap::new()).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id(), Some("1"));
    assert_eq!(rows[1].id(), Some("2"));
}

#[tokio::test]
async fn test_query_string_survives_tenant_substitution() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/tenancies/42/items"))
        .and(query_param("filter[description]", "torque"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let rows = client
        .list_items(params(json!({ "filter": { "description": "torque" }, "page": 2 })))
        .await
        .unwrap();

    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_save_item_posts_dto_envelope() {
    let (server, client, _) = setup().await;

    let response = json!({
        "data": { "type": "items", "id": "10", "attributes": { "description": "Caliper" } },
    });

    Mock::given(method("POST"))
        .and(path("/tenancies/42/items/create-or-update"))
        .and(body_partial_json(json!({
            "item_dto": { "description": "Caliper", "unit": "un" },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&response))
        .mount(&server)
        .await;

    let dto = ItemDto {
        description: Some("Caliper".into()),
        unit: Some("un".into()),
        ..ItemDto::default()
    };
    let saved = client.save_item(&dto).await.unwrap();

    assert_eq!(saved.id(), Some("10"));
    assert_eq!(saved.attr_str("description").as_deref(), Some("Caliper"));
}

#[tokio::test]
async fn test_remove_joins_ids_as_csv_path() {
    let (server, client, _) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/tenancies/42/items/1,2"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    client
        .remove_items(&["1".to_owned(), "2".to_owned()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_returns_token_and_document() {
    let (server, client, _) = setup().await;

    let body = json!({
        "token": "fresh-token",
        "data": {
            "type": "users",
            "id": "u1",
            "attributes": { "name": "Ana", "email": "ana@example.com" },
        },
        "included": [
            { "type": "tenancies", "id": "42", "attributes": { "name": "Matriz" } },
        ],
    });

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_partial_json(json!({ "email": "ana@example.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let login = client.login("ana@example.com", "s3cret").await.unwrap();

    assert_eq!(login.token, "fresh-token");
    assert_eq!(login.document.included.len(), 1);
}

// ── Pre-flight cancellation ─────────────────────────────────────────

#[tokio::test]
async fn test_missing_tenant_aborts_before_network() {
    let (server, client, _) = setup().await;
    client.set_context(RequestContext::authenticated(SecretString::from("sekret")));

    // Any request reaching the server would fail this expectation.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client.list_items(ParamMap::new()).await.unwrap_err();

    assert!(err.is_cancellation(), "expected cancellation, got: {err:?}");
    assert_eq!(err.status(), 0);
}

#[tokio::test]
async fn test_unscoped_paths_work_without_a_tenant() {
    let (server, client, _) = setup().await;
    client.set_context(RequestContext::authenticated(SecretString::from("sekret")));

    Mock::given(method("GET"))
        .and(path("/tenancies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    let rows = client.list_tenancies(ParamMap::new()).await.unwrap();
    assert!(rows.is_empty());
}

// ── Session teardown ────────────────────────────────────────────────

#[tokio::test]
async fn test_401_triggers_teardown_and_still_rejects() {
    let (server, client, hooks) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_items(ParamMap::new()).await;

    assert!(
        matches!(result, Err(Error::Unauthenticated { .. })),
        "expected Unauthenticated, got: {result:?}"
    );
    assert_eq!(hooks.unauthenticated.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_unauthenticated_message_on_non_401_status() {
    let (server, client, hooks) = setup().await;

    // Message-based detection is independent of the status code.
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Unauthenticated." })),
        )
        .mount(&server)
        .await;

    let result = client.list_items(ParamMap::new()).await;

    assert!(matches!(result, Err(Error::Unauthenticated { .. })));
    assert_eq!(hooks.unauthenticated.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_403_routes_to_access_denied_branch() {
    let (server, client, hooks) = setup().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden action" })),
        )
        .mount(&server)
        .await;

    let result = client.list_items(ParamMap::new()).await;

    assert!(matches!(result, Err(Error::AccessDenied { .. })));
    assert_eq!(hooks.denied.lock().unwrap().as_slice(), ["Forbidden action"]);
    assert_eq!(hooks.unauthenticated.load(Ordering::SeqCst), 0);
}

// ── Error normalization ─────────────────────────────────────────────

#[tokio::test]
async fn test_422_message_is_extracted() {
    let (server, client, _) = setup().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Code already in use" })),
        )
        .mount(&server)
        .await;

    let err = client.save_item(&ItemDto::default()).await.unwrap_err();

    match err {
        Error::Api { ref message, status } => {
            assert_eq!(status, 422);
            assert_eq!(message, "Code already in use");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
    assert_eq!(err.status(), 422);
}

#[tokio::test]
async fn test_empty_error_body_falls_back_to_generic_message() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_items(ParamMap::new()).await.unwrap_err();

    match err {
        Error::Api { ref message, status } => {
            assert_eq!(status, 500);
            assert_eq!(message, almoxa_api::error::GENERIC_ERROR_MESSAGE);
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_string_error_body_is_used_directly() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!("stock would go negative")))
        .mount(&server)
        .await;

    let err = client.list_items(ParamMap::new()).await.unwrap_err();

    match err {
        Error::Api { ref message, status } => {
            assert_eq!(status, 409);
            assert_eq!(message, "stock would go negative");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Context swap semantics ──────────────────────────────────────────

#[tokio::test]
async fn test_tenant_switch_applies_to_next_call() {
    let (server, client, _) = setup().await;

    Mock::given(method("GET"))
        .and(path("/tenancies/42/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tenancies/99/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&server)
        .await;

    client.list_items(ParamMap::new()).await.unwrap();
    client.set_context(tenant_context("99"));
    client.list_items(ParamMap::new()).await.unwrap();
}
