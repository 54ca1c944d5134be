//! Shared helpers for the HTTP integration tests.
//!
//! Each test file pulls this in with `mod common;`, so not every helper is
//! used by every file.
#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use ccb_api::auth::jwt::{generate_access_token, JwtConfig};
use ccb_api::auth::password::hash_password;
use ccb_api::config::{AppEnv, ServerConfig};
use ccb_api::router::build_app_router;
use ccb_api::state::AppState;
use ccb_db::models::user::{CreateUser, User, UserProfile};
use ccb_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Password of every user created through [`create_user_with_password`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Development cookie flags, fixed JWT secrets, no mailer.
pub fn test_config(upload_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        app_env: AppEnv::Development,
        upload_dir,
        frontend_url: "http://localhost:5173".to_string(),
        jwt: test_jwt_config(),
        email: None,
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        access_secret: "test-access-secret".to_string(),
        refresh_secret: "test-refresh-secret".to_string(),
        access_token_expiry_mins: 60,
        refresh_token_expiry_days: 30,
    }
}

/// Build the full application router, sharing the production middleware
/// stack. Uploads go to a scratch directory under the system temp dir.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_upload_dir(pool, std::env::temp_dir().join("ccb-api-tests"))
}

/// Like [`build_test_app`], with uploads written to `upload_dir`.
pub fn build_test_app_with_upload_dir(pool: PgPool, upload_dir: PathBuf) -> Router {
    let config = test_config(upload_dir);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Insert a user with the given role and a placeholder password hash.
///
/// The hash never verifies; use [`create_user_with_password`] for login tests.
pub async fn create_user(pool: &PgPool, email: &str, role: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: role.to_string(),
            profile: UserProfile {
                first_name: Some("Test".to_string()),
                last_name: Some(role.to_string()),
                ..Default::default()
            },
        },
    )
    .await
    .expect("user creation should succeed")
}

/// Insert a user whose password is [`TEST_PASSWORD`].
pub async fn create_user_with_password(pool: &PgPool, email: &str, role: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash,
            role: role.to_string(),
            profile: UserProfile::default(),
        },
    )
    .await
    .expect("user creation should succeed")
}

/// `Cookie` header value carrying a freshly signed access token for `user`.
pub fn session_cookie(user: &User) -> String {
    let token = generate_access_token(user.id, &user.role, &test_jwt_config())
        .expect("token generation should succeed");
    format!("access_token={token}")
}

/// Create a user with `role` and return it with a ready-to-send session cookie.
pub async fn signed_in(pool: &PgPool, role: &str) -> (User, String) {
    let user = create_user(pool, &format!("{role}@ccb.test"), role).await;
    let cookie = session_cookie(&user);
    (user, cookie)
}

/// Collect the `Set-Cookie` headers of a response.
pub fn set_cookies<B>(response: &Response<B>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

/// Turn a response's `Set-Cookie` headers into a request `Cookie` header value.
pub fn cookie_header<B>(response: &Response<B>) -> String {
    set_cookies(response)
        .iter()
        .filter_map(|c| c.split(';').next())
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a request through the router.
pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router should not fail")
}

fn request(method: Method, uri: &str, cookie: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder
}

async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let req = request(method, uri, cookie)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let req = request(Method::GET, uri, Some(cookie))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, None, body).await
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::POST, uri, Some(cookie), body).await
}

pub async fn post_with_cookie(app: Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let req = request(Method::POST, uri, cookie)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn put_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PUT, uri, Some(cookie), body).await
}

pub async fn patch_json_with_cookie(
    app: Router,
    uri: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, Method::PATCH, uri, Some(cookie), body).await
}

pub async fn delete_with_cookie(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    let req = request(Method::DELETE, uri, Some(cookie))
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
