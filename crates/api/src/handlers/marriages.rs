//! Handlers for the `/marriages` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::roles::Capability;
use ccb_core::types::DbId;
use ccb_db::models::marriage::{CreateMarriage, Marriage, MarriageWithDetails, UpdateMarriage};
use ccb_db::repositories::{MarriageDocumentRepo, MarriageRepo};
use ccb_db::DbPool;

use super::marriage_documents::remove_stored_file;
use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireRegisterViewer, RequireRegistrar};
use crate::state::AppState;

/// Load a marriage or fail with 404.
///
/// Party and document handlers use this to check the owning marriage.
pub(crate) async fn load_marriage(pool: &DbPool, id: DbId) -> AppResult<Marriage> {
    MarriageRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Marriage",
            id,
        }))
}

/// POST /api/v1/marriages
pub async fn create(
    State(state): State<AppState>,
    RequireRegistrar(registrar): RequireRegistrar,
    Json(input): Json<CreateMarriage>,
) -> AppResult<(StatusCode, Json<Marriage>)> {
    let marriage = MarriageRepo::create(&state.pool, &input).await?;
    tracing::info!(
        marriage_id = marriage.id,
        user_id = marriage.user_id,
        recorded_by = registrar.user_id,
        "Marriage recorded"
    );
    Ok((StatusCode::CREATED, Json(marriage)))
}

/// GET /api/v1/marriages
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<Marriage>>> {
    let marriages = MarriageRepo::list(&state.pool).await?;
    Ok(Json(marriages))
}

/// GET /api/v1/marriages/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Marriage>> {
    let marriage = load_marriage(&state.pool, id).await?;
    auth.ensure_owner_or(marriage.user_id, Capability::ViewRegisters)?;
    Ok(Json(marriage))
}

/// GET /api/v1/marriages/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Marriage>>> {
    auth.ensure_owner_or(user_id, Capability::ViewRegisters)?;
    let marriages = MarriageRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(marriages))
}

/// GET /api/v1/marriages/user/{user_id}/full
///
/// Every marriage of the user, each with its parties and documents.
pub async fn list_full_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<MarriageWithDetails>>> {
    auth.ensure_owner_or(user_id, Capability::ViewRegisters)?;
    let marriages = MarriageRepo::list_with_details_by_user(&state.pool, user_id).await?;
    Ok(Json(marriages))
}

/// PUT|PATCH /api/v1/marriages/{id}
pub async fn update(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMarriage>,
) -> AppResult<Json<Marriage>> {
    require_changes(&input)?;
    let marriage = MarriageRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Marriage",
            id,
        }))?;
    Ok(Json(marriage))
}

/// DELETE /api/v1/marriages/{id}
///
/// Party and document rows cascade; the stored document files are removed
/// afterwards.
pub async fn delete(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let documents = MarriageDocumentRepo::list_by_marriage(&state.pool, id).await?;
    let deleted = MarriageRepo::delete(&state.pool, id).await?;
    if deleted {
        for document in &documents {
            remove_stored_file(&state.config.upload_dir, &document.file_path).await;
        }
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Marriage",
            id,
        }))
    }
}
