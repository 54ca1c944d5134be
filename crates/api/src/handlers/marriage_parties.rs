//! Handlers for the `/marriage-parties` resource.
//!
//! Parties are read with the permissions of the marriage they belong to.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::marriage::{validate_party_age, validate_party_type};
use ccb_core::roles::Capability;
use ccb_core::types::DbId;
use ccb_db::models::marriage_party::{CreateMarriageParty, MarriageParty, UpdateMarriageParty};
use ccb_db::repositories::{MarriagePartyRepo, MarriageRepo};

use super::marriages::load_marriage;
use super::require_changes;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireRegisterViewer, RequireRegistrar};
use crate::state::AppState;

fn party_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MarriageParty",
        id,
    })
}

fn validate_full_name(full_name: &str) -> AppResult<()> {
    if full_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "full_name must not be empty".into(),
        )));
    }
    Ok(())
}

/// POST /api/v1/marriage-parties
pub async fn create(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Json(input): Json<CreateMarriageParty>,
) -> AppResult<(StatusCode, Json<MarriageParty>)> {
    validate_party_type(&input.party_type)?;
    validate_party_age(input.age)?;
    validate_full_name(&input.full_name)?;
    if !MarriageRepo::exists(&state.pool, input.marriage_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Marriage",
            id: input.marriage_id,
        }));
    }

    let party = MarriagePartyRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(party)))
}

/// GET /api/v1/marriage-parties
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<MarriageParty>>> {
    let parties = MarriagePartyRepo::list(&state.pool).await?;
    Ok(Json(parties))
}

/// GET /api/v1/marriage-parties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MarriageParty>> {
    let party = MarriagePartyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| party_not_found(id))?;
    if !auth.can(Capability::ViewRegisters) {
        let marriage = load_marriage(&state.pool, party.marriage_id).await?;
        auth.ensure_owner_or(marriage.user_id, Capability::ViewRegisters)?;
    }
    Ok(Json(party))
}

/// GET /api/v1/marriage-parties/marriage/{marriage_id}
///
/// Groom first, then bride, then witnesses.
pub async fn list_by_marriage(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(marriage_id): Path<DbId>,
) -> AppResult<Json<Vec<MarriageParty>>> {
    let marriage = load_marriage(&state.pool, marriage_id).await?;
    auth.ensure_owner_or(marriage.user_id, Capability::ViewRegisters)?;
    let parties = MarriagePartyRepo::list_by_marriage(&state.pool, marriage_id).await?;
    Ok(Json(parties))
}

/// PUT|PATCH /api/v1/marriage-parties/{id}
pub async fn update(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMarriageParty>,
) -> AppResult<Json<MarriageParty>> {
    require_changes(&input)?;
    if let Some(party_type) = input.party_type.as_deref() {
        validate_party_type(party_type)?;
    }
    validate_party_age(input.age)?;
    if let Some(full_name) = input.full_name.as_deref() {
        validate_full_name(full_name)?;
    }

    let party = MarriagePartyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| party_not_found(id))?;
    Ok(Json(party))
}

/// DELETE /api/v1/marriage-parties/{id}
pub async fn delete(
    State(state): State<AppState>,
    _registrar: RequireRegistrar,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if MarriagePartyRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(party_not_found(id))
    }
}
