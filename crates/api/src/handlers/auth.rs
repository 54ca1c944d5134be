//! Handlers for the `/auth` resource (register, login, refresh, logout,
//! current user, email verification).

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::AppendHeaders;
use axum::Json;
use ccb_core::error::CoreError;
use ccb_core::roles::DEFAULT_ROLE;
use ccb_core::types::DbId;
use ccb_db::models::user::{CreateUser, User, UserProfile, UserResponse};
use ccb_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::cookies::{
    expired_cookie, read_cookie, token_cookie, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE,
};
use crate::auth::jwt::{
    generate_access_token, generate_email_verification_token, generate_refresh_token,
    validate_email_verification_token, validate_refresh_token,
};
use crate::auth::password::{hash_password, verify_password};
use crate::email::verification_link;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Two `Set-Cookie` headers: access and refresh.
type AuthCookies = AppendHeaders<[(HeaderName, String); 2]>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    #[serde(flatten)]
    pub profile: UserProfile,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query string for `GET /auth/verify-email`.
#[derive(Debug, Deserialize)]
pub struct VerifyEmailQuery {
    pub token: String,
}

/// Body returned by login and refresh. The tokens themselves are in cookies.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Public self-registration. The account always gets the default role.
/// When SMTP is configured a verification email is sent in the background.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    input.validate()?;

    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email is already registered".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            email: input.email,
            password_hash,
            role: DEFAULT_ROLE.name().to_string(),
            profile: input.profile,
        },
    )
    .await?;
    tracing::info!(user_id = user.id, "User registered");

    send_verification_email(&state, &user);

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Sets the access and refresh cookies.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(AuthCookies, Json<AuthResponse>)> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(|| {
            tracing::info!("Login failed: unknown email");
            invalid()
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login failed: wrong password");
        return Err(invalid());
    }

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");
    issue_session(&state, user)
}

/// POST /api/v1/auth/refresh
///
/// Exchange the refresh cookie for a new pair of cookies. The user is
/// reloaded so role changes take effect.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(AuthCookies, Json<AuthResponse>)> {
    let token = read_cookie(&headers, REFRESH_TOKEN_COOKIE).ok_or_else(|| {
        AppError::Core(CoreError::Unauthorized("Refresh token missing".into()))
    })?;

    let claims = validate_refresh_token(&token, &state.config.jwt).map_err(|e| {
        tracing::debug!(error = %e, "Rejected refresh token");
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    })?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    issue_session(&state, user)
}

/// POST /api/v1/auth/logout
///
/// Clears both auth cookies. Fails with 401 when neither cookie was sent.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<(AuthCookies, Json<MessageResponse>)> {
    let has_access = read_cookie(&headers, ACCESS_TOKEN_COOKIE).is_some();
    let has_refresh = read_cookie(&headers, REFRESH_TOKEN_COOKIE).is_some();
    if !has_access && !has_refresh {
        return Err(AppError::Core(CoreError::Unauthorized(
            "User not logged in".into(),
        )));
    }

    let secure = state.config.app_env.secure_cookies();
    let cookies = AppendHeaders([
        (SET_COOKIE, expired_cookie(ACCESS_TOKEN_COOKIE, secure)),
        (SET_COOKIE, expired_cookie(REFRESH_TOKEN_COOKIE, secure)),
    ]);
    Ok((cookies, Json(MessageResponse::new("Logged out successfully"))))
}

/// GET /api/v1/auth/me
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(user.into()))
}

/// GET /api/v1/auth/verify-email?token=...
pub async fn verify_email(
    State(state): State<AppState>,
    Query(query): Query<VerifyEmailQuery>,
) -> AppResult<Json<MessageResponse>> {
    let user_id: DbId = validate_email_verification_token(&query.token, &state.config.jwt)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected verification token");
            AppError::BadRequest("Invalid or expired verification token".into())
        })?;

    if !UserRepo::mark_email_verified(&state.pool, user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }));
    }
    tracing::info!(user_id, "Email verified");
    Ok(Json(MessageResponse::new("Email verified successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Sign both tokens for `user` and build the cookie headers and body.
fn issue_session(state: &AppState, user: User) -> AppResult<(AuthCookies, Json<AuthResponse>)> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, &user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = generate_refresh_token(user.id, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let secure = state.config.app_env.secure_cookies();
    let cookies = AppendHeaders([
        (
            SET_COOKIE,
            token_cookie(
                ACCESS_TOKEN_COOKIE,
                &access_token,
                jwt.access_max_age_secs(),
                secure,
            ),
        ),
        (
            SET_COOKIE,
            token_cookie(
                REFRESH_TOKEN_COOKIE,
                &refresh_token,
                jwt.refresh_max_age_secs(),
                secure,
            ),
        ),
    ]);

    Ok((
        cookies,
        Json(AuthResponse {
            user: user.into(),
            expires_in: jwt.access_max_age_secs(),
        }),
    ))
}

/// Send the verification email without blocking the response.
///
/// Failures are logged; registration has already succeeded.
fn send_verification_email(state: &AppState, user: &User) {
    let Some(mailer) = state.mailer.clone() else {
        tracing::info!(
            user_id = user.id,
            "Email delivery not configured, verification email skipped"
        );
        return;
    };

    let token = match generate_email_verification_token(user.id, &state.config.jwt) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(user_id = user.id, error = %e, "Failed to sign verification token");
            return;
        }
    };
    let link = verification_link(&state.config.frontend_url, &token);
    let to = user.email.clone();
    let user_id = user.id;

    tokio::spawn(async move {
        if let Err(e) = mailer.send_verification(&to, &link).await {
            tracing::warn!(user_id, error = %e, "Failed to send verification email");
        }
    });
}
