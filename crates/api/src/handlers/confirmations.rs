//! Handlers for the `/confirmations` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::roles::Capability;
use ccb_core::types::DbId;
use ccb_db::models::confirmation::{Confirmation, CreateConfirmation, UpdateConfirmation};
use ccb_db::repositories::ConfirmationRepo;

use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireRegisterViewer, RequireRegistrar};
use crate::state::AppState;

/// POST /api/v1/confirmations
pub async fn create(
    State(state): State<AppState>,
    RequireRegistrar(registrar): RequireRegistrar,
    Json(input): Json<CreateConfirmation>,
) -> AppResult<(StatusCode, Json<Confirmation>)> {
    let confirmation = ConfirmationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        confirmation_id = confirmation.id,
        user_id = confirmation.user_id,
        recorded_by = registrar.user_id,
        "Confirmation recorded"
    );
    Ok((StatusCode::CREATED, Json(confirmation)))
}

/// GET /api/v1/confirmations
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<Confirmation>>> {
    let confirmations = ConfirmationRepo::list(&state.pool).await?;
    Ok(Json(confirmations))
}

/// GET /api/v1/confirmations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Confirmation>> {
    let confirmation = ConfirmationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Confirmation",
            id,
        }))?;
    auth.ensure_owner_or(confirmation.user_id, Capability::ViewRegisters)?;
    Ok(Json(confirmation))
}

/// GET /api/v1/confirmations/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<Vec<Confirmation>>> {
    auth.ensure_owner_or(user_id, Capability::ViewRegisters)?;
    let confirmations = ConfirmationRepo::list_by_user(&state.pool, user_id).await?;
    Ok(Json(confirmations))
}

/// PUT|PATCH /api/v1/confirmations/{id}
pub async fn update(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConfirmation>,
) -> AppResult<Json<Confirmation>> {
    require_changes(&input)?;
    let confirmation = ConfirmationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Confirmation",
            id,
        }))?;
    Ok(Json(confirmation))
}

/// DELETE /api/v1/confirmations/{id}
pub async fn delete(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ConfirmationRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Confirmation",
            id,
        }))
    }
}
