//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener, and an in-memory object store in place
//! of S3.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use showroom_api::auth::jwt::{generate_session_token, JwtConfig};
use showroom_api::config::ServerConfig;
use showroom_api::router::build_app_router;
use showroom_api::state::AppState;
use showroom_db::repositories::{SessionRepo, UserRepo};
use showroom_storage::{MemoryObjectStore, S3Config};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        asset_url_ttl_secs: 3600,
        manifest_cache_secs: 300,
        portal_base_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            session_expiry_days: 7,
            login_token_expiry_mins: 15,
        },
        storage: S3Config {
            bucket: "test-bucket".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            public_base_url: None,
        },
        smtp: None,
    }
}

/// Build the full application router over an in-memory object store.
///
/// This goes through [`build_app_router`] so integration tests exercise the
/// same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let (app, _storage) = build_test_app_with_storage(pool);
    app
}

/// Like [`build_test_app`], but also hands back the storage double so tests
/// can assert on stored objects or inject presigning failures.
pub fn build_test_app_with_storage(pool: PgPool) -> (Router, Arc<MemoryObjectStore>) {
    let config = test_config();
    let storage = Arc::new(MemoryObjectStore::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage: storage.clone(),
    };

    (build_app_router(state, &config), storage)
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// A signed-in test account: user id plus a valid session JWT.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

/// Create a user with an open session and mint a JWT for it.
pub async fn sign_in(pool: &PgPool, email: &str) -> TestUser {
    let user = UserRepo::find_or_create(pool, email)
        .await
        .expect("user creation should succeed");
    let session = SessionRepo::create(pool, user.id, Utc::now() + Duration::days(7))
        .await
        .expect("session creation should succeed");
    let token = generate_session_token(user.id, &user.email, session.id, &test_config().jwt)
        .expect("token generation should succeed");
    TestUser {
        user_id: user.id,
        token,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Parse a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart upload helpers
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "----showroom-test-boundary";

/// Build and send a multipart upload with a `kind` part and a `file` part.
pub async fn upload_file(
    app: Router,
    uri: &str,
    token: &str,
    kind: &str,
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"kind\"\r\n\r\n\
             {kind}\r\n\
             --{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Like [`upload_file`], but with extra text parts (e.g. declared `width`,
/// `height`, or `duration`) ahead of the file part.
pub async fn upload_file_with_meta(
    app: Router,
    uri: &str,
    token: &str,
    kind: &str,
    meta: &[(&str, &str)],
    file_name: &str,
    content_type: &str,
    bytes: &[u8],
) -> Response<Body> {
    let mut body: Vec<u8> = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"kind\"\r\n\r\n\
             {kind}\r\n"
        )
        .as_bytes(),
    );
    for (name, value) in meta {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{name}\"\r\n\r\n\
                 {value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// A minimal valid 1x1 PNG, for exercising dimension extraction.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x64,
    0x60, 0xF8, 0x5F, 0x0F, 0x00, 0x02, 0x87, 0x01, 0x80, 0xEB, 0x47, 0xBA, 0x92, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

// ---------------------------------------------------------------------------
// Scenario helpers
// ---------------------------------------------------------------------------

/// Create a project through the API and return its id.
pub async fn create_project(pool: &PgPool, user: &TestUser, name: &str) -> Uuid {
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/projects",
        &user.token,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .expect("created project should have a UUID id")
}

/// Look up a project's public slug.
pub async fn project_slug(pool: &PgPool, id: Uuid) -> String {
    sqlx::query_scalar("SELECT slug FROM projects WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("project should have a slug")
}

/// Force a project into the published state directly in the database, so
/// showroom tests do not have to walk the whole wizard.
pub async fn publish_project(pool: &PgPool, id: Uuid, genre: &str, track: &str) {
    sqlx::query(
        "UPDATE projects SET \
            is_public = TRUE, \
            onboarding_step = 'done', \
            onboarding_completed_at = now(), \
            genre = $2, \
            publishing_track = $3 \
         WHERE id = $1",
    )
    .bind(id)
    .bind(genre)
    .bind(track)
    .execute(pool)
    .await
    .expect("publishing the project should succeed");
}
