//! Pulls session credentials out of request headers.
//!
//! The auth provider sets `better-auth.session_token=<token>.<signature>` (with a `__Secure-`
//! prefix over HTTPS); API clients may send `Authorization: Bearer <token>` instead.

use axum::http::{header, HeaderMap};
use chat_relay::Credentials;

const SESSION_COOKIE: &str = "better-auth.session_token";
const SECURE_SESSION_COOKIE: &str = "__Secure-better-auth.session_token";

/// Bearer token first, then the session cookie. No usable value means anonymous.
pub fn credentials_from_headers(headers: &HeaderMap) -> Credentials {
    let token = bearer_token(headers).or_else(|| session_cookie(headers));
    Credentials {
        session_token: token,
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE || *name == SECURE_SESSION_COOKIE)
        .and_then(|(_, value)| {
            // signed value: the token is everything before the first '.'
            let token = value.split('.').next().unwrap_or_default().trim();
            (!token.is_empty()).then(|| token.to_string())
        })
}
