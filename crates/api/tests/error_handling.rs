//! `AppError` to HTTP response mapping.
//!
//! Most cases call `IntoResponse` directly; the database cases provoke real
//! Postgres errors so constraint names are classified as in production.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use simcc_api::error::AppError;
use simcc_core::error::CoreError;
use simcc_db::repositories::{DepartmentRepo, RoleRepo};
use sqlx::PgPool;

async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_names_entity_and_id() {
    let err = AppError::Core(CoreError::not_found("Department", 42));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Department with id 42 not found");
}

#[tokio::test]
async fn missing_keeps_message_verbatim() {
    let err = AppError::Core(CoreError::Missing("Registro não encontrado.".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Registro não encontrado.");
}

#[tokio::test]
async fn validation_and_bad_request_are_400() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Validation("bad year".into()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");

    let (status, json) = error_to_response(AppError::BadRequest("bad id".into())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "bad id");
}

#[tokio::test]
async fn auth_errors_map_to_401_and_403() {
    let (status, json) =
        error_to_response(AppError::Core(CoreError::Unauthorized("Not authenticated".into())))
            .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"], "Not authenticated");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Forbidden("Not the owner".into()))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn internal_errors_are_sanitized() {
    let (status, json) =
        error_to_response(AppError::InternalError("disk path /srv/x leaked".into())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "An internal error occurred");

    let (status, json) =
        error_to_response(AppError::Core(CoreError::Internal("secret".into()))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
}

#[tokio::test]
async fn row_not_found_is_404() {
    let (status, _) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_violation_is_409(pool: PgPool) {
    RoleRepo::create(&pool, "EDITOR").await.unwrap();
    let err = RoleRepo::create(&pool, "EDITOR").await.unwrap_err();
    assert_matches!(&err, sqlx::Error::Database(_));

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_roles_name"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_key_violation_is_400(pool: PgPool) {
    let links = [simcc_db::models::researcher::DepartmentResearcher {
        dep_id: 404,
        researcher_id: uuid::Uuid::new_v4(),
    }];
    let err = DepartmentRepo::add_researchers(&pool, &links).await.unwrap_err();

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "FOREIGN_KEY_VIOLATION");
}
