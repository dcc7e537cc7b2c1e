//! Bearer API key check for the `/api` routes

use std::sync::OnceLock;

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::models::api_error;

/// Key loaded from the `PREPWISE_API_KEY` secret
static API_KEY: OnceLock<String> = OnceLock::new();

pub fn init_api_key(key: String) {
    let _ = API_KEY.set(key);
}

fn configured_key() -> Option<&'static str> {
    API_KEY.get().map(String::as_str).filter(|k| !k.is_empty())
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Reject requests whose bearer token does not match the API key.
///
/// With no key configured every request passes.
pub async fn require_api_key(request: Request, next: Next) -> Response {
    let Some(expected) = configured_key() else {
        return next.run(request).await;
    };

    match bearer_token(&request) {
        Some(token) if token == expected => next.run(request).await,
        Some(_) => {
            tracing::warn!("Invalid API key attempted");
            api_error(StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
        None => {
            tracing::warn!("Missing or malformed Authorization header");
            api_error(StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
        }
    }
}
