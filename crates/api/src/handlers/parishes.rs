//! Handlers for the `/parishes` resource.
//!
//! Any signed-in user may read parishes; writes need
//! [`Capability::ManageParishes`](ccb_core::roles::Capability::ManageParishes).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::types::DbId;
use ccb_db::models::parish::{CreateParish, Parish, UpdateParish};
use ccb_db::repositories::ParishRepo;

use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireParishManager};
use crate::state::AppState;

fn validate_parish_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "parish_name must not be empty".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/parishes
pub async fn create(
    State(state): State<AppState>,
    _manager: RequireParishManager,
    Json(input): Json<CreateParish>,
) -> AppResult<(StatusCode, Json<Parish>)> {
    validate_parish_name(&input.parish_name)?;
    let parish = ParishRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(parish)))
}

/// GET /api/v1/parishes
pub async fn list(State(state): State<AppState>, _auth: RequireAuth) -> AppResult<Json<Vec<Parish>>> {
    let parishes = ParishRepo::list(&state.pool).await?;
    Ok(Json(parishes))
}

/// GET /api/v1/parishes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Parish>> {
    let parish = ParishRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parish",
            id,
        }))?;
    Ok(Json(parish))
}

/// GET /api/v1/parishes/name/{name}
///
/// Full-text match on the parish name.
pub async fn find_by_name(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Parish>>> {
    let parishes = ParishRepo::find_by_name(&state.pool, &name).await?;
    Ok(Json(parishes))
}

/// GET /api/v1/parishes/deanery/{deanery}
pub async fn list_by_deanery(
    State(state): State<AppState>,
    _auth: RequireAuth,
    Path(deanery): Path<String>,
) -> AppResult<Json<Vec<Parish>>> {
    let parishes = ParishRepo::list_by_deanery(&state.pool, &deanery).await?;
    Ok(Json(parishes))
}

/// PUT|PATCH /api/v1/parishes/{id}
pub async fn update(
    State(state): State<AppState>,
    _manager: RequireParishManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateParish>,
) -> AppResult<Json<Parish>> {
    require_changes(&input)?;
    if let Some(name) = input.parish_name.as_deref() {
        validate_parish_name(name)?;
    }
    let parish = ParishRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Parish",
            id,
        }))?;
    Ok(Json(parish))
}

/// DELETE /api/v1/parishes/{id}
pub async fn delete(
    State(state): State<AppState>,
    _manager: RequireParishManager,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ParishRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Parish",
            id,
        }))
    }
}
