//! Icon and cover uploads for users, collections, graduate programs,
//! institutions, research groups and departments.
//!
//! Every entity kind shares the same three operations; the router binds
//! them to each base path with [`UploadTarget`].

use std::str::FromStr;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use simcc_core::error::CoreError;
use simcc_core::types::{DbId, DepId};
use simcc_core::uploads::{image_extension, FileKind};
use simcc_db::repositories::{
    CollectionRepo, DepartmentRepo, GraduateProgramRepo, InstitutionRepo, ResearchGroupRepo,
    UserRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;
use crate::storage::{content_type, StoredImage};

/// Entity kind an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadTarget {
    User,
    Collection,
    GraduateProgram,
    Institution,
    Group,
    Department,
}

impl UploadTarget {
    /// Sub-folder of the upload directory.
    pub fn folder(self) -> &'static str {
        match self {
            UploadTarget::User => "user",
            UploadTarget::Collection => "collection",
            UploadTarget::GraduateProgram => "graduate_program",
            UploadTarget::Institution => "institution",
            UploadTarget::Group => "group",
            UploadTarget::Department => "department",
        }
    }

    fn entity(self) -> &'static str {
        match self {
            UploadTarget::User => "User",
            UploadTarget::Collection => "Collection",
            UploadTarget::GraduateProgram => "GraduateProgram",
            UploadTarget::Institution => "Institution",
            UploadTarget::Group => "ResearchGroup",
            UploadTarget::Department => "Department",
        }
    }

    /// Parse the path id and check that the entity exists.
    ///
    /// The stored file name is built from the parsed id, so `07` and `7`,
    /// or differently cased UUIDs, address the same file.
    async fn resolve(self, state: &AppState, raw_id: &str) -> AppResult<Entity> {
        let missing = || AppError::Core(CoreError::not_found(self.entity(), raw_id));

        if self == UploadTarget::Department {
            let dep_id = DepId::from_str(raw_id)
                .map_err(|_| AppError::BadRequest(format!("Invalid department id '{raw_id}'")))?;
            DepartmentRepo::find_by_id(&state.pool, dep_id)
                .await?
                .ok_or_else(missing)?;
            return Ok(Entity {
                key: dep_id.to_string(),
                owner: None,
            });
        }

        let id = DbId::from_str(raw_id)
            .map_err(|_| AppError::BadRequest(format!("Invalid id '{raw_id}'")))?;
        let owner = match self {
            UploadTarget::User => {
                UserRepo::find_by_id(&state.pool, id).await?.ok_or_else(missing)?;
                Some(id)
            }
            UploadTarget::Collection => {
                let collection = CollectionRepo::find_by_id(&state.pool, id)
                    .await?
                    .ok_or_else(missing)?;
                Some(collection.user_id)
            }
            UploadTarget::GraduateProgram => {
                GraduateProgramRepo::find_by_id(&state.pool, id)
                    .await?
                    .ok_or_else(missing)?;
                None
            }
            UploadTarget::Institution => {
                InstitutionRepo::find_by_id(&state.pool, id)
                    .await?
                    .ok_or_else(missing)?;
                None
            }
            UploadTarget::Group => {
                ResearchGroupRepo::find_by_id(&state.pool, id)
                    .await?
                    .ok_or_else(missing)?;
                None
            }
            UploadTarget::Department => None,
        };
        Ok(Entity {
            key: id.to_string(),
            owner,
        })
    }

    /// Resolve the entity and require write access for owned kinds.
    async fn authorize_write(
        self,
        state: &AppState,
        auth: &AuthUser,
        raw_id: &str,
    ) -> AppResult<Entity> {
        let entity = self.resolve(state, raw_id).await?;
        if let Some(owner) = entity.owner {
            auth.ensure_self_or_admin(owner)?;
        }
        Ok(entity)
    }
}

/// An existing upload target.
struct Entity {
    /// Canonical id used in stored file names.
    key: String,
    /// Owning user of users and collections.
    owner: Option<DbId>,
}

fn parse_kind(raw: &str) -> AppResult<FileKind> {
    Ok(FileKind::from_str(raw)?)
}

fn io_error(e: std::io::Error) -> AppError {
    AppError::InternalError(format!("Could not access stored file: {e}"))
}

async fn read_upload(mut multipart: Multipart) -> AppResult<(String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no name".into()))?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok((filename, data.to_vec()));
    }
    Err(AppError::BadRequest("Missing required 'file' field".into()))
}

// ---------------------------------------------------------------------------
// Shared operations
// ---------------------------------------------------------------------------

/// GET {base}/{id}/upload/{kind}
pub async fn get_file(
    target: UploadTarget,
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
) -> AppResult<Response> {
    let kind = parse_kind(&kind)?;
    let entity = target.resolve(&state, &id).await?;
    serve(&state, target, kind, &entity.key).await
}

/// POST {base}/{id}/upload/{kind}
pub async fn upload_file(
    target: UploadTarget,
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<StoredImage>)> {
    let kind = parse_kind(&kind)?;
    let entity = target.authorize_write(&state, &auth, &id).await?;
    store(&state, target, kind, &entity.key, multipart).await
}

/// DELETE {base}/{id}/upload/{kind}
pub async fn delete_file(
    target: UploadTarget,
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, kind)): Path<(String, String)>,
) -> AppResult<Json<MessageResponse>> {
    let kind = parse_kind(&kind)?;
    let entity = target.authorize_write(&state, &auth, &id).await?;
    remove(&state, target, kind, &entity.key).await
}

// ---------------------------------------------------------------------------
// Caller's own user images
// ---------------------------------------------------------------------------

/// GET /api/v1/user/upload/my/{kind}
pub async fn get_my_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Response> {
    let kind = parse_kind(&kind)?;
    serve(&state, UploadTarget::User, kind, &auth.user_id.to_string()).await
}

/// POST /api/v1/user/upload/my/{kind}
pub async fn upload_my_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<StoredImage>)> {
    let kind = parse_kind(&kind)?;
    store(&state, UploadTarget::User, kind, &auth.user_id.to_string(), multipart).await
}

/// DELETE /api/v1/user/upload/my/{kind}
pub async fn delete_my_file(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let kind = parse_kind(&kind)?;
    remove(&state, UploadTarget::User, kind, &auth.user_id.to_string()).await
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

async fn serve(
    state: &AppState,
    target: UploadTarget,
    kind: FileKind,
    entity_id: &str,
) -> AppResult<Response> {
    let path = state
        .images()
        .find(target.folder(), kind, entity_id)
        .await
        .map_err(io_error)?
        .ok_or_else(|| AppError::Core(CoreError::Missing(kind.not_found_message().into())))?;
    let data = tokio::fs::read(&path).await.map_err(io_error)?;
    Ok(([(header::CONTENT_TYPE, content_type(&path))], data).into_response())
}

async fn store(
    state: &AppState,
    target: UploadTarget,
    kind: FileKind,
    entity_id: &str,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<StoredImage>)> {
    let (filename, data) = read_upload(multipart).await?;
    let ext = image_extension(&filename)?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    let stored = state
        .images()
        .save(target.folder(), kind, entity_id, &ext, &data)
        .await
        .map_err(io_error)?;
    tracing::info!(
        folder = target.folder(),
        kind = kind.as_str(),
        entity_id,
        bytes = data.len(),
        "Image stored"
    );
    Ok((StatusCode::CREATED, Json(stored)))
}

async fn remove(
    state: &AppState,
    target: UploadTarget,
    kind: FileKind,
    entity_id: &str,
) -> AppResult<Json<MessageResponse>> {
    let removed = state
        .images()
        .remove(target.folder(), kind, entity_id)
        .await
        .map_err(io_error)?;
    if !removed {
        return Err(AppError::Core(CoreError::Missing(
            kind.not_found_message().into(),
        )));
    }
    Ok(Json(MessageResponse {
        message: kind.deleted_message().into(),
    }))
}
