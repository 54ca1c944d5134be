//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::roles::{Capability, Role, DEFAULT_ROLE};
use ccb_core::types::DbId;
use ccb_db::models::user::{CreateUser, UpdateUser, UserProfile, UserResponse};
use ccb_db::repositories::{MarriageDocumentRepo, MarriageRepo, UserRepo};
use serde::Deserialize;
use validator::{Validate, ValidateEmail};

use super::marriage_documents::remove_stored_file;
use super::require_changes;
use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{forbidden, AuthUser};
use crate::middleware::rbac::{RequireAdmin, RequireRegisterViewer};
use crate::response::UserCountResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    /// Defaults to `member` when omitted.
    pub role: Option<String>,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Request body for `PUT|PATCH /users/{id}`.
///
/// A new plaintext `password` is hashed before it reaches the changeset.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub password: Option<String>,
    #[serde(flatten)]
    pub fields: UpdateUser,
}

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;

    let role = match input.role.as_deref() {
        Some(name) => Role::from_name(name)?,
        None => DEFAULT_ROLE,
    };

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            role: role.name().to_string(),
            profile: input.profile,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, %role, created_by = admin.user_id, "User created");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users
pub async fn list(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/count
pub async fn count(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
) -> AppResult<Json<UserCountResponse>> {
    let user_count = UserRepo::count(&state.pool).await?;
    Ok(Json(UserCountResponse { user_count }))
}

/// GET /api/v1/users/{id}
///
/// Users may read their own record; reading anyone else's needs
/// [`Capability::ViewRegisters`].
pub async fn get_by_id(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    auth.ensure_owner_or(id, Capability::ViewRegisters)?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/name/{name}
pub async fn find_by_name(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::find_by_name(&state.pool, &name).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/v1/users/parish/{parish_id}
pub async fn list_by_parish(
    State(state): State<AppState>,
    _viewer: RequireRegisterViewer,
    Path(parish_id): Path<DbId>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list_by_parish(&state.pool, parish_id).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT|PATCH /api/v1/users/{id}
///
/// Users may update their own profile. Changing a role, or editing another
/// user, requires [`Capability::ManageUsers`].
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    auth.ensure_owner_or(id, Capability::ManageUsers)?;

    let mut fields = input.fields;
    if let Some(role) = fields.role.as_deref() {
        if !auth.can(Capability::ManageUsers) {
            tracing::info!(user_id = auth.user_id, target = id, "Role change refused");
            return Err(forbidden());
        }
        Role::from_name(role)?;
    }
    if let Some(email) = fields.email.as_deref() {
        if !email.validate_email() {
            return Err(AppError::Core(CoreError::Validation(
                "Invalid email address".into(),
            )));
        }
    }
    if let Some(password) = input.password.as_deref() {
        validate_password_strength(password).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
        let hash = hash_password(password)
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
        fields.password_hash = Some(hash);
    }

    require_changes(&fields)?;

    let user = UserRepo::update(&state.pool, id, &fields)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/users/{id}
///
/// The user's sacrament and marriage rows cascade; stored files of their
/// marriage documents are removed afterwards.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let marriage_ids: Vec<DbId> = MarriageRepo::list_by_user(&state.pool, id)
        .await?
        .into_iter()
        .map(|m| m.id)
        .collect();
    let documents = if marriage_ids.is_empty() {
        Vec::new()
    } else {
        MarriageDocumentRepo::list_by_marriages(&state.pool, &marriage_ids).await?
    };

    if !UserRepo::delete(&state.pool, id).await? {
        return Err(user_not_found(id));
    }
    tracing::info!(
        user_id = id,
        deleted_by = admin.user_id,
        documents = documents.len(),
        "User deleted"
    );
    for document in &documents {
        remove_stored_file(&state.config.upload_dir, &document.file_path).await;
    }
    Ok(StatusCode::NO_CONTENT)
}
