//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path};
use axum::{Json, Router};
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::{Value, json};
use tower::ServiceExt;
use validator::Validate;

use groundwork_api::extractors::{Inbound, Language, Paging, ValidatedJson};
use groundwork_api::middleware::errors::render_errors;
use groundwork_api::{AppState, build_router};
use groundwork_core::config::AppConfig;
use groundwork_core::error::AppError;
use groundwork_core::message::codes;
use groundwork_core::validation::email;
use groundwork_locale::{Culture, MultipleStringLocalizer, ResourceLocalizer, ResourceSet};

fn resource_set(name: &str, entries: &[(&str, &str, &str)]) -> ResourceSet {
    let mut cultures: HashMap<String, HashMap<String, String>> = HashMap::new();
    for (culture, key, value) in entries {
        cultures
            .entry(culture.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
    }
    ResourceSet::from_map(name, cultures)
}

fn state() -> AppState {
    let generic = resource_set(
        "generic",
        &[
            ("en", "1", "An unexpected error occurred"),
            ("en", "2", "A required parameter is missing"),
            ("en", "3", "An external service failed"),
            ("en", "4", "The e-mail address is invalid"),
            ("en", "404", "Not found"),
            ("en", "405", "Method not allowed"),
            ("en", "413", "Body too large"),
            ("fr", "2", "Un paramètre obligatoire est manquant"),
            ("fr", "404", "Introuvable"),
        ],
    );
    let custom = resource_set("app", &[("en", "5", "Unknown project"), ("en", "900", "Quota exceeded")]);
    let en = Culture::new("en");
    let localizer = MultipleStringLocalizer::new(
        Arc::new(ResourceLocalizer::new(custom, en.clone())),
        Arc::new(ResourceLocalizer::new(generic, en)),
    );

    let mut config = AppConfig::default();
    config.localization.supported_cultures = vec!["en".to_string(), "fr".to_string()];
    config.http_status.insert("900".to_string(), 429);

    AppState::new(config, None, localizer).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[derive(Debug, Deserialize, Validate)]
struct SignUp {
    #[validate(required)]
    name: Option<String>,
    #[validate(custom(function = "email"))]
    contact: Option<String>,
}

async fn sign_up(ValidatedJson(body): ValidatedJson<SignUp>) -> Json<Value> {
    Json(json!({ "name": body.name, "contact": body.contact }))
}

async fn fail_with(Path(code): Path<String>) -> Result<Json<Value>, AppError> {
    Err(AppError::business(code))
}

async fn echo_context(
    Language(culture): Language,
    Inbound(context): Inbound,
    Paging(paging): Paging,
) -> Json<Value> {
    Json(json!({
        "culture": culture.to_string(),
        "authorization": context.authorization,
        "acceptLanguage": context.accept_language,
        "offset": paging.offset(),
        "limit": paging.limit(),
    }))
}

/// Routes used only by these tests, behind the same error renderer.
fn test_router() -> Router {
    let state = state();
    Router::new()
        .route("/signup", post(sign_up))
        .route("/fail/{code}", get(fail_with))
        .route("/context", get(echo_context))
        .layer(DefaultBodyLimit::max(64))
        .layer(from_fn_with_state(state.clone(), render_errors))
        .with_state(state)
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(build_router(state()), get_request("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_ready_without_database() {
    let (status, body) = send(build_router(state()), get_request("/api/health/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["database"], "disabled");
}

#[tokio::test]
async fn test_message_lookup_is_localized() {
    let request = Request::builder()
        .uri("/api/messages/2")
        .header(header::ACCEPT_LANGUAGE, "fr-CA, en;q=0.5")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(build_router(state()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["culture"], "fr");
    assert_eq!(body["data"]["text"], "Un paramètre obligatoire est manquant");
}

#[tokio::test]
async fn test_custom_message_wins() {
    let (_, body) = send(build_router(state()), get_request("/api/messages/5")).await;
    assert_eq!(body["data"]["text"], "Unknown project");
}

#[tokio::test]
async fn test_unknown_message_is_localized_404() {
    let request = Request::builder()
        .uri("/api/messages/nope")
        .header(header::ACCEPT_LANGUAGE, "fr")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(build_router(state()), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({ "success": false, "code": "404", "message": "Introuvable" })
    );
}

#[tokio::test]
async fn test_message_list_is_paged() {
    let (status, body) = send(
        build_router(state()),
        get_request("/api/messages?index=1&size=2"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["pageIndex"], 1);
    assert_eq!(body["pageSize"], 2);
    // 7 generic + 2 custom strings for English
    assert_eq!(body["pageCount"], 5);
}

#[tokio::test]
async fn test_unknown_route_is_envelope() {
    let (status, body) = send(build_router(state()), get_request("/nowhere")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "404");
}

#[tokio::test]
async fn test_wrong_method_is_envelope() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(build_router(state()), request).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        body,
        json!({ "success": false, "code": "405", "message": "Method not allowed" })
    );
}

#[tokio::test]
async fn test_unmapped_code_yields_400() {
    let (status, body) = send(test_router(), get_request("/fail/unmapped")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "success": false, "code": "unmapped" }));
}

#[tokio::test]
async fn test_configured_status_override() {
    let (status, body) = send(test_router(), get_request("/fail/900")).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["message"], "Quota exceeded");
}

#[tokio::test]
async fn test_external_service_error_is_503() {
    let (status, body) = send(test_router(), get_request("/fail/3")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "An external service failed");
}

fn json_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/signup")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_validated_json_accepts_valid_body() {
    let (status, body) = send(
        test_router(),
        json_post(r#"{"name":"Ada","contact":"ada@example.com"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada");
}

#[tokio::test]
async fn test_missing_required_field() {
    let (status, body) = send(test_router(), json_post(r#"{"contact":"ada@example.com"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], codes::REQUIRED_PARAMETER);
    assert_eq!(body["message"], "A required parameter is missing");
}

#[tokio::test]
async fn test_invalid_email() {
    let (status, body) = send(test_router(), json_post(r#"{"name":"Ada","contact":"nope"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], codes::AUTH_EMAIL_INVALID);
    assert_eq!(body["message"], "The e-mail address is invalid");
}

#[tokio::test]
async fn test_malformed_json_is_invalid_parameter() {
    let (status, body) = send(test_router(), json_post("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], codes::INVALID_PARAMETER);
}

#[tokio::test]
async fn test_oversized_body_is_413() {
    let padding = "x".repeat(200);
    let (status, body) = send(
        test_router(),
        json_post(&format!(r#"{{"name":"{padding}"}}"#)),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], codes::CONTENT_TOO_LARGE);
    assert_eq!(body["message"], "Body too large");
}

#[tokio::test]
async fn test_missing_content_type_is_415() {
    let request = Request::builder()
        .method("POST")
        .uri("/signup")
        .body(Body::from(r#"{"name":"Ada"}"#))
        .unwrap();
    let (status, body) = send(test_router(), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], codes::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_context_extractors() {
    let request = Request::builder()
        .uri("/context?index=3&size=0")
        .header(header::AUTHORIZATION, "Bearer abc")
        .header(header::ACCEPT_LANGUAGE, "de, fr;q=0.4")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_router(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["culture"], "fr");
    assert_eq!(body["authorization"], "Bearer abc");
    assert_eq!(body["acceptLanguage"], "de, fr;q=0.4");
    assert_eq!(body["offset"], 150);
    assert_eq!(body["limit"], 50);
}

#[tokio::test]
async fn test_invalid_paging_query() {
    let (status, body) = send(test_router(), get_request("/context?index=-1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], codes::INVALID_PARAMETER);
}
