//! Integration tests for API endpoints.
//!
//! Every test drives the full router against its own in-memory SQLite
//! database, so identifiers start at 1 in each test.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use user_crud::api::{create_router, AppState};
use user_crud::config::Config;
use user_crud::domain::{CreateUser, UpdateUser, User};
use user_crud::infra::Database;
use user_crud::services::UserService;
use user_crud::types::ListParams;
use user_crud::{AppError, AppResult};

// =============================================================================
// Test Helpers
// =============================================================================

async fn test_app() -> Router {
    create_router(AppState::from_database(Arc::new(test_database().await)))
}

async fn test_database() -> Database {
    Database::connect(&Config::in_memory())
        .await
        .expect("in-memory database should open")
}

/// User service whose every call fails, for exercising the error path.
struct UnavailableUserService;

#[async_trait]
impl UserService for UnavailableUserService {
    async fn create_user(&self, _input: CreateUser) -> AppResult<User> {
        Err(AppError::internal("user store offline"))
    }

    async fn list_users(&self, _params: ListParams) -> AppResult<Vec<User>> {
        Err(AppError::internal("user store offline"))
    }

    async fn get_user(&self, _id: i32) -> AppResult<User> {
        Err(AppError::internal("user store offline"))
    }

    async fn update_user(&self, _id: i32, _changes: UpdateUser) -> AppResult<User> {
        Err(AppError::internal("user store offline"))
    }

    async fn delete_user(&self, _id: i32) -> AppResult<User> {
        Err(AppError::internal("user store offline"))
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn create(app: &Router, name: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/users/",
        Some(json!({ "name": name, "email": email })),
    )
    .await
}

async fn seed_three(app: &Router) {
    for (name, email) in [
        ("Ada", "ada@example.com"),
        ("Grace", "grace@example.com"),
        ("Linus", "linus@example.com"),
    ] {
        let (status, _) = create(app, name, email).await;
        assert_eq!(status, StatusCode::OK);
    }
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_name_and_email() {
    let app = test_app().await;

    let (status, body) = create(&app, "Ada", "ada@example.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ada", "email": "ada@example.com" }));
}

#[tokio::test]
async fn test_create_then_get_round_trip() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(&app, Method::GET, "/users/1", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ada", "email": "ada@example.com" }));
}

#[tokio::test]
async fn test_create_without_trailing_slash() {
    let app = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({ "name": "Ada", "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_duplicate_email_is_conflict() {
    let app = test_app().await;
    create(&app, "Ada", "same@example.com").await;

    let (status, body) = create(&app, "Imposter", "same@example.com").await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
    assert_eq!(
        body["error"]["message"],
        "User with this email already exists"
    );

    let (_, list) = send(&app, Method::GET, "/users/", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["name"], "Ada");
}

#[tokio::test]
async fn test_create_missing_field_is_validation_error() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/users/", Some(json!({ "name": "Ada" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_empty_name_is_validation_error() {
    let app = test_app().await;

    let (status, body) = create(&app, "", "ada@example.com").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Name is required");

    let (_, list) = send(&app, Method::GET, "/users/", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

// =============================================================================
// List
// =============================================================================

#[tokio::test]
async fn test_list_returns_all_in_creation_order() {
    let app = test_app().await;
    seed_three(&app).await;

    let (status, body) = send(&app, Method::GET, "/users/?skip=0&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "name": "Ada", "email": "ada@example.com" },
            { "name": "Grace", "email": "grace@example.com" },
            { "name": "Linus", "email": "linus@example.com" },
        ])
    );
}

#[tokio::test]
async fn test_list_skip_two_returns_third() {
    let app = test_app().await;
    seed_three(&app).await;

    let (status, body) = send(&app, Method::GET, "/users/?skip=2&limit=10", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "name": "Linus", "email": "linus@example.com" }]));
}

#[tokio::test]
async fn test_list_past_the_end_is_empty() {
    let app = test_app().await;
    seed_three(&app).await;

    let (status, body) = send(&app, Method::GET, "/users/?skip=50", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_skip_beyond_signed_range_is_empty() {
    let app = test_app().await;
    seed_three(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/users/?skip=18446744073709551615&limit=10",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_list_limit_shortens_window() {
    let app = test_app().await;
    seed_three(&app).await;

    let (_, body) = send(&app, Method::GET, "/users?limit=2", None).await;

    assert_eq!(body.as_array().unwrap().len(), 2);
    assert_eq!(body[1]["name"], "Grace");
}

#[tokio::test]
async fn test_list_malformed_query_is_validation_error() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/users/?skip=-1", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Get
// =============================================================================

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/users/9999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_get_malformed_id_is_validation_error() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/users/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_update_email_only_keeps_name() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/1",
        Some(json!({ "email": "lovelace@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ada", "email": "lovelace@example.com" }));

    let (_, stored) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(stored, body);
}

#[tokio::test]
async fn test_update_name_only_keeps_email() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com").await;

    let (_, body) = send(
        &app,
        Method::POST,
        "/users/1",
        Some(json!({ "name": "Countess" })),
    )
    .await;

    assert_eq!(body, json!({ "name": "Countess", "email": "ada@example.com" }));
}

#[tokio::test]
async fn test_update_with_no_fields_is_noop() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(&app, Method::POST, "/users/1", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ada", "email": "ada@example.com" }));
}

#[tokio::test]
async fn test_update_missing_user_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users/42",
        Some(json!({ "name": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "User not found");
}

#[tokio::test]
async fn test_update_to_taken_email_is_conflict() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com").await;
    create(&app, "Grace", "grace@example.com").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/users/2",
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);

    let (_, stored) = send(&app, Method::GET, "/users/2", None).await;
    assert_eq!(stored["email"], "grace@example.com");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_returns_snapshot_then_not_found() {
    let app = test_app().await;
    create(&app, "Ada", "ada@example.com").await;

    let (status, body) = send(&app, Method::DELETE, "/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ada", "email": "ada@example.com" }));

    let (status, _) = send(&app, Method::GET, "/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_user_is_not_found() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::DELETE, "/users/7", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "User not found");
}

// =============================================================================
// Health & Docs
// =============================================================================

#[tokio::test]
async fn test_health_reports_database() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degraded_when_database_closed() {
    let database = test_database().await;
    let app = create_router(AppState::from_database(Arc::new(database.clone())));

    database
        .get_connection()
        .close()
        .await
        .expect("pool should close");

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["database"]["status"], "unhealthy");
    assert!(body["services"]["database"]["error"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/users/{id}"].is_object());
}

// =============================================================================
// Injected Services
// =============================================================================

#[tokio::test]
async fn test_service_failure_is_internal_error() {
    let state = AppState::new(
        Arc::new(UnavailableUserService),
        Arc::new(test_database().await),
    );
    let app = create_router(state);

    for (method, uri, body) in [
        (Method::GET, "/users/", None),
        (Method::GET, "/users/1", None),
        (Method::DELETE, "/users/1", None),
        (
            Method::POST,
            "/users/",
            Some(json!({ "name": "Ada", "email": "ada@example.com" })),
        ),
        (Method::POST, "/users/1", Some(json!({ "name": "Ada" }))),
    ] {
        let (status, body) = send(&app, method, uri, body).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(body["error"]["message"], "An internal error occurred");
    }
}
