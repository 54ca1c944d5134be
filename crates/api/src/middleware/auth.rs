//! Access-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use ccb_core::error::CoreError;
use ccb_core::roles::{Capability, Role};
use ccb_core::types::DbId;

use crate::auth::cookies::{read_cookie, ACCESS_TOKEN_COOKIE};
use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a verified access token.
///
/// The token is read from the `access_token` cookie; an
/// `Authorization: Bearer <token>` header is accepted when no cookie is sent.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub role: Role,
}

impl AuthUser {
    /// Whether the user's role grants `capability`.
    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }

    /// Allow the request if the user owns the record (`owner_id`) or holds
    /// `capability`; otherwise reject with 403.
    pub fn ensure_owner_or(&self, owner_id: DbId, capability: Capability) -> Result<(), AppError> {
        if self.user_id == owner_id || self.can(capability) {
            Ok(())
        } else {
            Err(forbidden())
        }
    }

    /// Reject with 403 unless the user holds `capability`.
    pub fn ensure(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) {
            Ok(())
        } else {
            Err(forbidden())
        }
    }
}

/// The 403 returned whenever a role lacks a capability.
pub fn forbidden() -> AppError {
    AppError::Core(CoreError::Forbidden("Insufficient permissions".into()))
}

/// Access token from the cookie, falling back to a Bearer header.
fn extract_token(headers: &HeaderMap) -> Option<String> {
    read_cookie(headers, ACCESS_TOKEN_COOKIE).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })?;

        let claims = validate_token(&token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let role = Role::from_name(&claims.role).map_err(|_| {
            tracing::warn!(user_id = claims.sub, role = %claims.role, "Token carries unknown role");
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
            role,
        })
    }
}
