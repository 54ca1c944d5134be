//! Handlers for the `/eucharists` resource (first holy communion).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::roles::Capability;
use ccb_core::types::DbId;
use ccb_db::models::eucharist::{CreateEucharist, Eucharist, UpdateEucharist};
use ccb_db::repositories::EucharistRepo;

use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireRegisterViewer, RequireRegistrar};
use crate::state::AppState;

/// POST /api/v1/eucharists
pub async fn create(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Json(input): Json<CreateEucharist>,
) -> AppResult<(StatusCode, Json<Eucharist>)> {
    let eucharist = EucharistRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(eucharist)))
}

/// GET /api/v1/eucharists
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<Eucharist>>> {
    let eucharists = EucharistRepo::list(&state.pool).await?;
    Ok(Json(eucharists))
}

/// GET /api/v1/eucharists/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Eucharist>> {
    let eucharist = EucharistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Eucharist",
            id,
        }))?;
    auth.ensure_owner_or(eucharist.user_id, Capability::ViewRegisters)?;
    Ok(Json(eucharist))
}

/// GET /api/v1/eucharists/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Eucharist>>> {
    auth.ensure_owner_or(user_id, Capability::ViewRegisters)?;
    let eucharists = EucharistRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(eucharists))
}

/// PUT|PATCH /api/v1/eucharists/{id}
pub async fn update(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEucharist>,
) -> AppResult<Json<Eucharist>> {
    require_changes(&input)?;
    let eucharist = EucharistRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Eucharist",
            id,
        }))?;
    Ok(Json(eucharist))
}

/// DELETE /api/v1/eucharists/{id}
pub async fn delete(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = EucharistRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Eucharist",
            id,
        }))
    }
}
