//! Integration tests for API endpoints.
//!
//! The router runs over the in-memory store, so no database is needed.

mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use peeriq_import::api::{create_router, AppState};
use peeriq_import::config::MAX_IMPORT_BODY_BYTES;
use peeriq_import::infra::MemoryPersistence;

use common::{admin, config, member, persistence, token_for};

fn app(persistence: &MemoryPersistence) -> Router {
    create_router(AppState::in_memory(persistence.clone(), config()))
}

fn import_request(token: Option<&str>, body: String) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/functions/v1/import-users")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn users_payload() -> String {
    json!({
        "users": [
            {
                "name": "John Smith",
                "email": "john.smith@company.com",
                "department": "Marketing",
                "role": "employee",
                "expertise": ["Social Media", "Content Creation"]
            },
            {
                "name": "Sarah Chen",
                "email": "sarah.chen@company.com",
                "department": "Data Analytics",
                "role": "nope"
            }
        ]
    })
    .to_string()
}

// =============================================================================
// Public endpoints
// =============================================================================

#[tokio::test]
async fn test_root_endpoint() {
    let response = app(&persistence())
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_memory_store() {
    let response = app(&persistence())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
async fn test_openapi_document_lists_import_path() {
    let response = app(&persistence())
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["paths"]["/functions/v1/import-users"].is_object());
}

// =============================================================================
// Import endpoint
// =============================================================================

#[tokio::test]
async fn test_import_requires_token() {
    let response = app(&persistence())
        .oneshot(import_request(None, users_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Authentication required");
    assert_eq!(body["successful"], 0);
    assert_eq!(body["failed"], 0);
}

#[tokio::test]
async fn test_import_rejects_bad_token() {
    let response = app(&persistence())
        .oneshot(import_request(Some("not-a-jwt"), users_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid authentication token");
}

#[tokio::test]
async fn test_import_forbidden_for_non_admin() {
    let persistence = persistence();
    let caller = member(&persistence).await;

    let response = app(&persistence)
        .oneshot(import_request(Some(&token_for(&caller)), users_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Admin access required for user import");
    assert_eq!(body["errors"], json!(["Admin access required for user import"]));
    assert_eq!(persistence.store().identity_count().await, 1);
}

#[tokio::test]
async fn test_non_admin_is_forbidden_before_body_is_read() {
    let persistence = persistence();
    let caller = member(&persistence).await;

    let response = app(&persistence)
        .oneshot(import_request(
            Some(&token_for(&caller)),
            json!({ "users": "x" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Admin access required for user import");
}

#[tokio::test]
async fn test_import_reports_per_record_results() {
    let persistence = persistence();
    let admin = admin(&persistence).await;

    let response = app(&persistence)
        .oneshot(import_request(Some(&token_for(&admin)), users_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["successful"], 1);
    assert_eq!(body["failed"], 1);
    assert_eq!(
        body["errors"],
        json!([
            "sarah.chen@company.com: Invalid role \"nope\". Must be one of: employee, expert, management, admin"
        ])
    );
}

#[tokio::test]
async fn test_import_rejects_body_without_users_array() {
    let persistence = persistence();
    let admin = admin(&persistence).await;

    let response = app(&persistence)
        .oneshot(import_request(
            Some(&token_for(&admin)),
            json!({ "users": "everyone" }).to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid users data - expected array of users");
}

#[tokio::test]
async fn test_import_accepts_batch_over_two_megabytes() {
    let persistence = persistence();
    let admin = admin(&persistence).await;

    let expertise: Vec<String> = (0..50).map(|i| format!("{:0>100}", i)).collect();
    let users: Vec<Value> = (0..500)
        .map(|i| {
            json!({
                "name": format!("User {}", i),
                "email": format!("user{}@company.com", i),
                "department": "Engineering",
                "role": "employee",
                "expertise": expertise
            })
        })
        .collect();
    let payload = json!({ "users": users }).to_string();
    assert!(payload.len() > 2 * 1024 * 1024);

    let response = app(&persistence)
        .oneshot(import_request(Some(&token_for(&admin)), payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 500);
    assert_eq!(body["successful"], 500);
    assert_eq!(body["failed"], 0);
    assert_eq!(persistence.store().identity_count().await, 501);
}

#[tokio::test]
async fn test_import_rejects_body_over_limit() {
    let persistence = persistence();
    let admin = admin(&persistence).await;

    let response = app(&persistence)
        .oneshot(import_request(
            Some(&token_for(&admin)),
            " ".repeat(MAX_IMPORT_BODY_BYTES + 1),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Import request exceeds the 16 MB body limit");
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");
    assert_eq!(persistence.store().identity_count().await, 1);
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let response = app(&persistence())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/functions/v1/import-users")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
    assert!(allowed.contains("x-client-info"));
    assert!(allowed.contains("apikey"));
}
