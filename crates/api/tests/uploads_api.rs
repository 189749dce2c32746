//! Icon and cover uploads stored under a temporary upload directory.

mod common;

use axum::http::{header, StatusCode};
use common::{
    body_bytes, body_json, delete_auth, get, get_auth, post_file_auth, post_json_auth,
    user_with_token,
};
use serde_json::json;
use sqlx::PgPool;

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake-png";
const JPEG: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

async fn institution(app: axum::Router, token: &str) -> String {
    let response = post_json_auth(
        app,
        "/api/v1/institution",
        token,
        json!({ "name": "Universidade X" }),
    )
    .await;
    body_json(response).await["data"][0]["institution_id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn icon_upload_replaces_previous_extension(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());
    let id = institution(app.clone(), &token).await;
    let uri = format!("/api/v1/institution/{id}/upload/icon");

    let first = post_file_auth(app.clone(), &uri, &token, "logo.PNG", PNG).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let stored = body_json(first).await;
    assert_eq!(stored["filename"], format!("icon_{id}.png"));
    assert_eq!(stored["path"], format!("institution/icon_{id}.png"));
    assert!(dir.path().join("institution").join(format!("icon_{id}.png")).exists());

    let second = post_file_auth(app.clone(), &uri, &token, "logo.jpg", JPEG).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    assert!(!dir.path().join("institution").join(format!("icon_{id}.png")).exists());

    let served = get(app.clone(), &uri).await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(served.headers()[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(body_bytes(served).await, JPEG);

    let cover = get(app, &format!("/api/v1/institution/{id}/upload/cover")).await;
    assert_eq!(cover.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(cover).await["error"], "Capa não encontrado.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_file_and_reports_missing(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());
    let id = institution(app.clone(), &token).await;
    let uri = format!("/api/v1/institution/{id}/upload/cover");

    post_file_auth(app.clone(), &uri, &token, "capa.webp", PNG).await;

    let deleted = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(
        body_json(deleted).await["message"],
        "Imagem de capa excluída com sucesso."
    );

    let again = delete_auth(app, &uri, &token).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(again).await["error"], "Capa não encontrado.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rejects_bad_kind_extension_and_entity(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());
    let id = institution(app.clone(), &token).await;

    let kind = post_file_auth(
        app.clone(),
        &format!("/api/v1/institution/{id}/upload/banner"),
        &token,
        "a.png",
        PNG,
    )
    .await;
    assert_eq!(kind.status(), StatusCode::BAD_REQUEST);

    let ext = post_file_auth(
        app.clone(),
        &format!("/api/v1/institution/{id}/upload/icon"),
        &token,
        "script.exe",
        PNG,
    )
    .await;
    assert_eq!(ext.status(), StatusCode::BAD_REQUEST);

    let empty = post_file_auth(
        app.clone(),
        &format!("/api/v1/institution/{id}/upload/icon"),
        &token,
        "a.png",
        b"",
    )
    .await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    let unknown = post_file_auth(
        app.clone(),
        &format!("/api/v1/institution/{}/upload/icon", uuid::Uuid::new_v4()),
        &token,
        "a.png",
        PNG,
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

    let malformed = get(app, "/api/v1/department/not-a-number/upload/icon").await;
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn equivalent_ids_address_the_same_file(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_user, token) = user_with_token(&pool, "curator").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let department = post_json_auth(
        app.clone(),
        "/api/v1/department",
        &token,
        json!({ "dep_id": 7, "dep_nom": "Departamento de Física" }),
    )
    .await;
    assert_eq!(department.status(), StatusCode::CREATED);

    let stored = post_file_auth(
        app.clone(),
        "/api/v1/department/07/upload/icon",
        &token,
        "icon.png",
        PNG,
    )
    .await;
    assert_eq!(stored.status(), StatusCode::CREATED);
    assert_eq!(body_json(stored).await["filename"], "icon_7.png");

    let served = get(app.clone(), "/api/v1/department/7/upload/icon").await;
    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(body_bytes(served).await, PNG);

    let id = institution(app.clone(), &token).await;
    let upper = format!("/api/v1/institution/{}/upload/cover", id.to_uppercase());
    let stored = post_file_auth(app.clone(), &upper, &token, "capa.jpg", JPEG).await;
    assert_eq!(body_json(stored).await["filename"], format!("cover_{id}.jpg"));

    let deleted = delete_auth(
        app,
        &format!("/api/v1/institution/{id}/upload/cover"),
        &token,
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn user_images_are_owned(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (owner, owner_token) = user_with_token(&pool, "owner").await;
    let (_other, other_token) = user_with_token(&pool, "other").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let mine = post_file_auth(
        app.clone(),
        "/api/v1/user/upload/my/icon",
        &owner_token,
        "me.png",
        PNG,
    )
    .await;
    assert_eq!(mine.status(), StatusCode::CREATED);

    let public = get(app.clone(), &format!("/api/v1/user/upload/{}/icon", owner.user_id)).await;
    assert_eq!(public.status(), StatusCode::OK);
    assert_eq!(body_bytes(public).await, PNG);

    let forbidden = post_file_auth(
        app.clone(),
        &format!("/api/v1/user/upload/{}/icon", owner.user_id),
        &other_token,
        "x.png",
        PNG,
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let removed = delete_auth(app.clone(), "/api/v1/user/upload/my/icon", &owner_token).await;
    assert_eq!(body_json(removed).await["message"], "Ícone excluído com sucesso.");

    let gone = get_auth(app, "/api/v1/user/upload/my/icon", &owner_token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(gone).await["error"], "Ícone não encontrado.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn collection_cover_requires_owner(pool: PgPool) {
    let dir = tempfile::tempdir().unwrap();
    let (_owner, owner_token) = user_with_token(&pool, "owner").await;
    let (_other, other_token) = user_with_token(&pool, "other").await;
    let app = common::build_test_app_with_uploads(pool, dir.path());

    let created = post_json_auth(
        app.clone(),
        "/api/v1/collection",
        &owner_token,
        json!({ "name": "Leituras" }),
    )
    .await;
    let id = body_json(created).await["data"]["collection_id"]
        .as_str()
        .unwrap()
        .to_string();
    let uri = format!("/api/v1/collection/{id}/upload/cover");

    let forbidden = post_file_auth(app.clone(), &uri, &other_token, "c.png", PNG).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let allowed = post_file_auth(app, &uri, &owner_token, "c.png", PNG).await;
    assert_eq!(allowed.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(allowed).await["path"],
        format!("collection/cover_{id}.png")
    );
}
