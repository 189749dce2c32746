//! Handlers for the `/collection` resource: user-curated lists of entries.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::DbId;
use simcc_db::models::collection::{
    Collection, CollectionEntry, CreateCollection, CreateCollectionEntry, UpdateCollection,
};
use simcc_db::repositories::CollectionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const COLLECTION_NOT_FOUND: &str = "Collection not found";

fn collection_not_found() -> AppError {
    AppError::Core(CoreError::Missing(COLLECTION_NOT_FOUND.into()))
}

/// Load a collection and require the caller to own it.
///
/// Missing collections are 404; collections of other users are 403.
pub(crate) async fn owned_collection(
    state: &AppState,
    auth: &AuthUser,
    id: DbId,
) -> AppResult<Collection> {
    let collection = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(collection_not_found)?;
    if collection.user_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not the owner of this collection".into(),
        )));
    }
    Ok(collection)
}

/// POST /api/v1/collection
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateCollection>,
) -> AppResult<(StatusCode, Json<DataResponse<Collection>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    let collection = CollectionRepo::create(&state.pool, auth.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: collection })))
}

/// GET /api/v1/collection
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let rows = CollectionRepo::list_for_user(&state.pool, auth.user_id, false).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/collection/public/{user_id}
pub async fn list_public(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Collection>>>> {
    let rows = CollectionRepo::list_for_user(&state.pool, user_id, true).await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/collection/{id}
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Collection>>> {
    let collection = CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.user_id == auth.user_id)
        .ok_or_else(collection_not_found)?;
    Ok(Json(DataResponse { data: collection }))
}

/// PUT /api/v1/collection/{id}
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCollection>,
) -> AppResult<Json<DataResponse<Collection>>> {
    let collection = CollectionRepo::update(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(collection_not_found)?;
    Ok(Json(DataResponse { data: collection }))
}

/// DELETE /api/v1/collection/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CollectionRepo::soft_delete(&state.pool, id, auth.user_id).await? {
        tracing::info!(collection_id = %id, user_id = %auth.user_id, "Collection deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(collection_not_found())
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// POST /api/v1/collection/{id}/entries
pub async fn add_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateCollectionEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<CollectionEntry>>)> {
    owned_collection(&state, &auth, id).await?;
    let entry = CollectionRepo::add_entry(&state.pool, id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/collection/{id}/entries
///
/// Visible to the owner, and to everyone while the collection is public.
pub async fn list_entries(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CollectionEntry>>>> {
    CollectionRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.user_id == auth.user_id || c.visible)
        .ok_or_else(collection_not_found)?;
    let entries = CollectionRepo::list_entries(&state.pool, id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// DELETE /api/v1/collection/{id}/entries/{entry_id}
pub async fn remove_entry(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, entry_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    owned_collection(&state, &auth, id).await?;
    if CollectionRepo::remove_entry(&state.pool, id, entry_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::Missing(
            "Entry not found in collection".into(),
        )))
    }
}
