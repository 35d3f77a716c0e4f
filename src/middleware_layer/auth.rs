use axum::{
    body::Body,
    extract::State,
    http::{header, Request},
    middleware::Next,
    response::Response,
};

use crate::{
    crypto::token,
    error::AppError,
    models::identity::Claims,
    state::AppState,
};

/// Extracts the bearer token from the `Authorization` header.
///
/// # Arguments
///
/// * `request` - The incoming request.
///
/// # Returns
///
/// An `Option` containing the raw token if present.
fn extract_bearer_token(request: &Request<Body>) -> Option<&str> {
    let value = request
        .headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// A middleware that requires a valid bearer token.
///
/// On success the verified `Claims` are inserted as a request extension.
///
/// # Returns
///
/// A `Response`, or `AppError::InvalidToken` (401 with a `Bearer` challenge).
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    tracing::debug!("🔐 Checking bearer token...");

    let raw = extract_bearer_token(&request)
        .ok_or_else(|| AppError::InvalidToken("missing bearer token".to_string()))?;

    let claims = token::verify(&state.config.token_secret, raw, chrono::Utc::now())?;

    tracing::debug!("✅ Token accepted for: {} ({})", claims.sub, claims.role);

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

/// A middleware that only lets administrators through.
///
/// Must be layered inside [`require_auth`].
pub async fn require_admin(request: Request<Body>, next: Next) -> Result<Response, AppError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::InvalidToken("missing bearer token".to_string()))?;

    if !claims.is_admin() {
        tracing::warn!("❌ {} ({}) denied admin route", claims.sub, claims.role);
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(value: &str) -> Request<Body> {
        Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(extract_bearer_token(&request_with("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token(&request_with("bearer abc")), Some("abc"));
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_ignored() {
        assert_eq!(extract_bearer_token(&request_with("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer_token(&request_with("Bearer ")), None);
        assert_eq!(extract_bearer_token(&request_with("Bearer")), None);
        assert_eq!(
            extract_bearer_token(&Request::builder().body(Body::empty()).unwrap()),
            None
        );
    }
}
