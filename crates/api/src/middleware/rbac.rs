//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role lacks
//! the required [`Capability`]. Use these in route handlers to enforce
//! authorization at the type level, before the handler body runs.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use ccb_core::roles::Capability;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn require(
    parts: &mut Parts,
    state: &AppState,
    capability: Capability,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    user.ensure(capability).inspect_err(|_| {
        tracing::debug!(
            user_id = user.user_id,
            role = %user.role,
            ?capability,
            "Capability check failed"
        );
    })?;
    Ok(user)
}

/// Requires [`Capability::ManageUsers`] (admin only). Rejects with 403 otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Capability::ManageUsers)
            .await
            .map(RequireAdmin)
    }
}

/// Requires [`Capability::ManageParishes`] (admin, archbishop, dean).
pub struct RequireParishManager(pub AuthUser);

impl FromRequestParts<AppState> for RequireParishManager {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Capability::ManageParishes)
            .await
            .map(RequireParishManager)
    }
}

/// Requires [`Capability::RecordSacraments`]: clergy and clerks who write
/// sacrament, marriage party and document records.
pub struct RequireRegistrar(pub AuthUser);

impl FromRequestParts<AppState> for RequireRegistrar {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Capability::RecordSacraments)
            .await
            .map(RequireRegistrar)
    }
}

/// Requires [`Capability::ViewRegisters`]: listing every record.
pub struct RequireRegisterViewer(pub AuthUser);

impl FromRequestParts<AppState> for RequireRegisterViewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        require(parts, state, Capability::ViewRegisters)
            .await
            .map(RequireRegisterViewer)
    }
}

/// Requires any authenticated user (any valid role).
///
/// Functionally equivalent to [`AuthUser`] but named explicitly for use in
/// route definitions where the intent "this route requires authentication"
/// should be self-documenting.
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        Ok(RequireAuth(user))
    }
}
