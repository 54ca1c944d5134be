//! Auth cookie formatting and parsing.
//!
//! Tokens travel in two `HttpOnly` cookies scoped to `/`. Production cookies
//! are `Secure; SameSite=None` so a separately hosted web client can send
//! them; development cookies use `SameSite=Lax` without `Secure`.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;

/// Cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Format a `Set-Cookie` value that stores `value` for `max_age_secs`.
pub fn token_cookie(name: &str, value: &str, max_age_secs: i64, secure: bool) -> String {
    format!(
        "{name}={value}; HttpOnly; Path=/; Max-Age={max_age_secs}; {}",
        same_site(secure)
    )
}

/// Format a `Set-Cookie` value that removes the cookie `name`.
pub fn expired_cookie(name: &str, secure: bool) -> String {
    token_cookie(name, "", 0, secure)
}

fn same_site(secure: bool) -> &'static str {
    if secure {
        "Secure; SameSite=None"
    } else {
        "SameSite=Lax"
    }
}

/// Read a non-empty cookie value from the request's `Cookie` headers.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
