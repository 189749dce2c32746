#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use simcc_api::auth::jwt::JwtConfig;
use simcc_api::auth::password::hash_password;
use simcc_api::config::ServerConfig;
use simcc_api::router::build_app_router;
use simcc_api::state::AppState;
use simcc_api::ws::WsManager;
use simcc_core::types::DbId;
use simcc_db::models::user::{CreateUser, User};
use simcc_db::repositories::{RoleRepo, UserRepo};
use simcc_events::ChatHub;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123";

/// Test `ServerConfig` with safe defaults, storing uploads in `upload_dir`.
pub fn test_config(upload_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        upload_dir: upload_dir.to_path_buf(),
        max_upload_bytes: 1024 * 1024,
        jwt: JwtConfig {
            secret: "test-secret-for-integration-tests".to_string(),
            access_token_expiry_mins: 30,
        },
    }
}

pub fn test_state(pool: PgPool, upload_dir: &Path) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config(upload_dir)),
        ws_manager: Arc::new(WsManager::new()),
        chat_hub: Arc::new(ChatHub::default()),
    }
}

/// Full application router over `pool`, with the production middleware
/// stack. Uploads go to a fresh temp dir that lives for the test process.
pub fn build_test_app(pool: PgPool) -> Router {
    let dir = tempfile::tempdir().expect("tempdir").keep();
    build_test_app_with_uploads(pool, &dir)
}

pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &Path) -> Router {
    let state = test_state(pool, upload_dir);
    let config = state.config.as_ref().clone();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        provider: "local".to_string(),
        institution_id: None,
        linkedin: None,
        lattes_id: None,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Grant the seeded `ADMIN` role to `user_id`.
pub async fn make_admin(pool: &PgPool, user_id: DbId) {
    let role = RoleRepo::find_by_name(pool, "ADMIN")
        .await
        .unwrap()
        .expect("ADMIN role is seeded");
    RoleRepo::assign_to_user(pool, user_id, role.role_id)
        .await
        .unwrap();
}

pub fn token_for(user: &User) -> String {
    let config = test_config(Path::new("."));
    simcc_api::auth::jwt::generate_access_token(user.user_id, &user.email, &config.jwt)
        .expect("token generation should succeed")
}

/// Create a user and return it with a valid bearer token.
pub async fn user_with_token(pool: &PgPool, username: &str) -> (User, String) {
    let user = create_user(pool, username).await;
    let token = token_for(&user);
    (user, token)
}

pub async fn admin_with_token(pool: &PgPool, username: &str) -> (User, String) {
    let (user, token) = user_with_token(pool, username).await;
    make_admin(pool, user.user_id).await;
    (user, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    builder
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    builder(method, uri, token)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::POST, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, builder(Method::DELETE, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap(),
    )
    .await
}

/// Multipart body with a single `file` field.
pub async fn post_file_auth(
    app: Router,
    uri: &str,
    token: &str,
    file_name: &str,
    data: &[u8],
) -> Response<Body> {
    let boundary = "simcc-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    send(
        app,
        builder(Method::POST, uri, Some(token))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}
