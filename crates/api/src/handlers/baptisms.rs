//! Handlers for the `/baptisms` resource.
//!
//! A person has at most one baptism record (`uq_baptisms_user_id`), so a
//! second create for the same user is a 409.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::roles::Capability;
use ccb_core::types::DbId;
use ccb_db::models::baptism::{Baptism, CreateBaptism, UpdateBaptism};
use ccb_db::repositories::BaptismRepo;

use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireRegisterViewer, RequireRegistrar};
use crate::state::AppState;

/// POST /api/v1/baptisms
pub async fn create(
    State(state): State<AppState>,
    RequireRegistrar(registrar): RequireRegistrar,
    Json(input): Json<CreateBaptism>,
) -> AppResult<(StatusCode, Json<Baptism>)> {
    let baptism = BaptismRepo::create(&state.pool, &input).await?;
    tracing::info!(
        baptism_id = baptism.id,
        user_id = baptism.user_id,
        recorded_by = registrar.user_id,
        "Baptism recorded"
    );
    Ok((StatusCode::CREATED, Json(baptism)))
}

/// GET /api/v1/baptisms
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<Baptism>>> {
    let baptisms = BaptismRepo::list(&state.pool).await?;
    Ok(Json(baptisms))
}

/// GET /api/v1/baptisms/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Baptism>> {
    let baptism = BaptismRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Baptism",
            id,
        }))?;
    auth.ensure_owner_or(baptism.user_id, Capability::ViewRegisters)?;
    Ok(Json(baptism))
}

/// GET /api/v1/baptisms/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Baptism>>> {
    auth.ensure_owner_or(user_id, Capability::ViewRegisters)?;
    let baptisms = BaptismRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(baptisms))
}

/// PUT|PATCH /api/v1/baptisms/{id}
pub async fn update(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBaptism>,
) -> AppResult<Json<Baptism>> {
    require_changes(&input)?;
    let baptism = BaptismRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Baptism",
            id,
        }))?;
    Ok(Json(baptism))
}

/// DELETE /api/v1/baptisms/{id}
pub async fn delete(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = BaptismRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Baptism",
            id,
        }))
    }
}
