use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use foresight_application::{AnalysisService, FallbackGenerator};
use foresight_core::ForesightError;
use foresight_core::generation::{GenerativeModel, ModelError, ModelRequest};
use foresight_core::record::{RecordKind, RecordPayload, RecordRepository, StoredRecord};
use foresight_infrastructure::InMemoryRecordRepository;
use foresight_server::routes::MAX_BODY_BYTES;
use foresight_server::{AppState, router};
use serde_json::{Value, json};
use std::collections::BTreeSet;
use std::sync::Arc;
use tower::ServiceExt;

/// Answers every prompt with the same text.
struct CannedModel(&'static str);

#[async_trait]
impl GenerativeModel for CannedModel {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _request: ModelRequest) -> Result<String, ModelError> {
        Ok(self.0.to_string())
    }
}

/// Record store whose writes always fail.
struct FailingRecords;

#[async_trait]
impl RecordRepository for FailingRecords {
    async fn put(&self, _user_id: &str, _payload: RecordPayload) -> foresight_core::Result<String> {
        Err(ForesightError::data_access("disk full"))
    }

    async fn get(&self, _kind: RecordKind, _id: &str) -> foresight_core::Result<Option<StoredRecord>> {
        Ok(None)
    }

    async fn list_chat_by_user(&self, _user_id: &str) -> foresight_core::Result<Vec<StoredRecord>> {
        Ok(Vec::new())
    }
}

struct TestApp {
    router: Router,
    records: Arc<InMemoryRecordRepository>,
}

fn simulation_app() -> TestApp {
    build_app(None)
}

fn app_with_model(reply: &'static str) -> TestApp {
    build_app(Some(Arc::new(CannedModel(reply))))
}

fn build_app(model: Option<Arc<dyn GenerativeModel>>) -> TestApp {
    let records = Arc::new(InMemoryRecordRepository::new());
    let mut service = AnalysisService::new(records.clone(), FallbackGenerator::seeded(11)).unwrap();
    if let Some(model) = model {
        service = service
            .with_text_model(model.clone())
            .with_vision_model(model);
    }
    TestApp {
        router: router(AppState::new(service)),
        records,
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    post_raw(uri, body.to_string())
}

fn post_raw(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}

fn assert_startup_shape(body: &Value) {
    assert_eq!(
        keys(body),
        BTreeSet::from(["analysis", "competitors", "emoji", "marketFit", "techStack"])
    );
    assert!(body["marketFit"].is_u64());
    assert!(body["techStack"].is_array());
    assert!(body["competitors"].is_array());
    assert_eq!(body["emoji"].as_str().unwrap().chars().count(), 1);
}

fn assert_roast_shape(body: &Value) {
    assert_eq!(
        keys(body),
        BTreeSet::from(["feedback", "score", "suggestedFix", "title"])
    );
    let score = body["score"].as_u64().unwrap();
    assert!((1..=10).contains(&score));
    let feedback = body["feedback"].as_array().unwrap();
    assert_eq!(feedback.len(), 3);
    for item in feedback {
        assert!(matches!(
            item["type"].as_str(),
            Some("positive" | "negative" | "warning")
        ));
        assert!(item["text"].is_string());
    }
}

#[tokio::test]
async fn test_health() {
    let app = simulation_app();
    let (status, body) = send(&app, get("/api/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_startup_rejects_invalid_ideas() {
    let app = simulation_app();
    let expected = json!({"error": "Please provide a valid startup idea"});

    for body in [json!({}), json!({"idea": "   "}), json!({"idea": 42}), json!({"idea": null})] {
        let (status, response) = send(&app, post_json("/api/startup/analyze", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, expected);
    }

    let (status, response) = send(&app, post_raw("/api/startup/analyze", "{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response, expected);
}

#[tokio::test]
async fn test_startup_simulation_returns_fallback_shape() {
    let app = simulation_app();
    let (status, body) = send(
        &app,
        post_json("/api/startup/analyze", json!({"idea": "AI shopping assistant"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_startup_shape(&body);
    let market_fit = body["marketFit"].as_u64().unwrap();
    assert!((50..=79).contains(&market_fit));
    assert!(
        body["analysis"]
            .as_str()
            .unwrap()
            .contains("personal shopping assistant")
    );
}

#[tokio::test]
async fn test_startup_normalizes_model_output() {
    let app = app_with_model(
        r#"foo{"marketFit":"77","techStack":["x"],"competitors":["y"],"analysis":"z","emoji":"🚀"}bar"#,
    );
    let (status, body) = send(
        &app,
        post_json("/api/startup/analyze", json!({"idea": "Plant sitter"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"analysis": "z", "marketFit": 77, "techStack": ["x"], "competitors": ["y"], "emoji": "🚀"})
    );
}

#[tokio::test]
async fn test_startup_without_json_falls_back() {
    let app = app_with_model("I'd rather not answer in JSON today.");
    let (status, body) = send(
        &app,
        post_json("/api/startup/analyze", json!({"idea": "Plant sitter"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_startup_shape(&body);
    assert!((50..=79).contains(&body["marketFit"].as_u64().unwrap()));
}

#[tokio::test]
async fn test_roast_without_image_uses_fallback() {
    let app = simulation_app();
    let (status, body) = send(&app, post_json("/api/design/roast", json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_roast_shape(&body);
    assert_eq!(body["title"], json!("Yikes, that's a lot of gradients!"));
    assert!((2..=7).contains(&body["score"].as_u64().unwrap()));
}

#[tokio::test]
async fn test_roast_with_image_uses_model() {
    let app = app_with_model(
        r#"```json
        {"title": "Clean but bland", "score": "8", "feedback": [
            {"type": "positive", "text": "Good spacing"},
            {"type": "negative", "text": "No focal point"},
            {"type": "warning", "text": "Check contrast"}
        ], "suggestedFix": "Add an accent color."}
        ```"#,
    );
    let (status, body) = send(
        &app,
        post_json(
            "/api/design/roast",
            json!({"imageData": "data:image/png;base64,aGVsbG8="}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_roast_shape(&body);
    assert_eq!(body["score"], json!(8));
    assert_eq!(body["title"], json!("Clean but bland"));
}

#[tokio::test]
async fn test_roast_rejects_unparsable_body() {
    let app = simulation_app();
    let (status, body) = send(&app, post_raw("/api/design/roast", "[1, 2")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body"}));
}

#[tokio::test]
async fn test_persona_validation_order() {
    let app = simulation_app();

    let (status, body) = send(
        &app,
        post_json("/api/chat/persona", json!({"message": " ", "persona": "nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Please provide a message"}));

    for persona in [json!("nobody"), json!("Past"), json!(1), Value::Null] {
        let (status, body) = send(
            &app,
            post_json("/api/chat/persona", json!({"message": "Hi", "persona": persona})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Please provide a valid persona (past, present, future)"})
        );
    }
}

#[tokio::test]
async fn test_persona_chat_is_recorded_in_history() {
    let app = app_with_model("Five years from now, you'll be glad you started.");
    let (status, body) = send(
        &app,
        post_json(
            "/api/chat/persona",
            json!({"message": "Should I start?", "persona": "future", "userId": "u-42"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"response": "Five years from now, you'll be glad you started."})
    );

    let (status, body) = send(&app, get("/api/chat/history/u-42")).await;
    assert_eq!(status, StatusCode::OK);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sender"], json!("user"));
    assert_eq!(messages[0]["message"], json!("Should I start?"));
    assert_eq!(messages[1]["sender"], json!("future"));
    assert_eq!(messages[1]["userId"], json!("u-42"));

    let (_, body) = send(&app, get("/api/chat/history/someone-else")).await;
    assert_eq!(body, json!({"messages": []}));
}

#[tokio::test]
async fn test_requests_without_user_are_not_recorded() {
    let app = simulation_app();
    send(
        &app,
        post_json("/api/startup/analyze", json!({"idea": "Plant sitter"})),
    )
    .await;
    send(&app, post_json("/api/design/roast", json!({"userId": ""}))).await;
    send(
        &app,
        post_json("/api/chat/persona", json!({"message": "Hi", "persona": "past"})),
    )
    .await;

    assert!(app.records.is_empty().await);
}

#[tokio::test]
async fn test_stored_records_are_served_by_id() {
    let app = simulation_app();
    let (_, analysis) = send(
        &app,
        post_json(
            "/api/startup/analyze",
            json!({"idea": "Plant sitter", "userId": "u-1"}),
        ),
    )
    .await;

    let id = app
        .records
        .list_all()
        .await
        .into_iter()
        .find(|record| record.kind() == RecordKind::StartupAnalysis)
        .map(|record| record.id)
        .unwrap();

    let (status, record) = send(&app, get(&format!("/api/startup/analyses/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["kind"], json!("startup_analysis"));
    assert_eq!(record["idea"], json!("Plant sitter"));
    assert_eq!(record["result"], analysis);

    let (status, body) = send(&app, get(&format!("/api/design/roasts/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = simulation_app();
    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_roast_without_body_uses_fallback() {
    let app = simulation_app();

    let bare = Request::builder()
        .method("POST")
        .uri("/api/design/roast")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, bare).await;
    assert_eq!(status, StatusCode::OK);
    assert_roast_shape(&body);

    let (status, body) = send(&app, post_raw("/api/design/roast", "")).await;
    assert_eq!(status, StatusCode::OK);
    assert_roast_shape(&body);
}

#[tokio::test]
async fn test_oversized_bodies_are_payload_too_large() {
    let app = simulation_app();
    let huge = "a".repeat(MAX_BODY_BYTES + 1);

    for uri in ["/api/startup/analyze", "/api/design/roast", "/api/chat/persona"] {
        let (status, response) = send(&app, post_json(uri, json!({"padding": huge}))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE, "{uri}");
        assert_eq!(response, json!({"error": "Request body too large"}));
    }
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let service = AnalysisService::new(Arc::new(FailingRecords), FallbackGenerator::seeded(3)).unwrap();
    let app = TestApp {
        router: router(AppState::new(service)),
        records: Arc::new(InMemoryRecordRepository::new()),
    };

    let cases = [
        (
            "/api/startup/analyze",
            json!({"idea": "Plant sitter", "userId": "u-1"}),
            "Failed to analyze startup idea",
        ),
        (
            "/api/design/roast",
            json!({"userId": "u-1"}),
            "Failed to analyze design",
        ),
        (
            "/api/chat/persona",
            json!({"message": "Hi", "persona": "present", "userId": "u-1"}),
            "Failed to generate response",
        ),
    ];

    for (uri, body, message) in cases {
        let (status, response) = send(&app, post_json(uri, body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(response, json!({"error": message}));
    }

    let (status, _) = send(
        &app,
        post_json("/api/startup/analyze", json!({"idea": "Plant sitter"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
