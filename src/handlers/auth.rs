use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::{
    crypto::token,
    error::{AppError, Result},
    models::identity::Role,
    response,
    services::auth as auth_service,
    state::AppState,
    validation::auth::{validate_registration, RegisterRequest},
};

/// The form-encoded login payload.
#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// The response payload for a successful login.
#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub role: Role,
    pub name: String,
}

/// The response payload for registration.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// Handles `POST /token`.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt for: {}", form.username);

    let identity =
        auth_service::authenticate(&state.db, &state.config, &form.username, &form.password)
            .await?;

    let access_token = token::issue(
        &state.config.token_secret,
        &identity,
        token_lifetime(state.config.token_ttl_minutes)?,
        chrono::Utc::now(),
    )?;

    tracing::info!("✅ Token issued for: {} ({})", identity.subject, identity.role);

    let body = TokenResponse {
        access_token,
        token_type: "bearer",
        role: identity.role,
        name: identity.display_name,
    };

    response::json(StatusCode::OK, &body)
}

fn token_lifetime(minutes: i64) -> Result<chrono::TimeDelta> {
    chrono::TimeDelta::try_minutes(minutes)
        .filter(|ttl| *ttl > chrono::TimeDelta::zero())
        .ok_or_else(|| AppError::Internal(format!("Token lifetime out of range: {} minutes", minutes)))
}

/// Handles `POST /register`.
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response> {
    tracing::info!("📝 Register attempt - Payload: {:?}", payload);
    validate_registration(&payload)?;

    auth_service::register_customer(
        &state.db,
        payload.first_name.trim().to_string(),
        payload.last_name.trim().to_string(),
        payload.email,
        &payload.password,
    )
    .await?;

    let body = AuthResponse {
        success: true,
        message: "Registration successful. Welcome!".to_string(),
    };

    response::json(StatusCode::CREATED, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lifetime_accepts_configured_minutes() {
        assert_eq!(token_lifetime(30).unwrap(), chrono::TimeDelta::minutes(30));
    }

    #[test]
    fn token_lifetime_rejects_unrepresentable_and_non_positive() {
        assert!(matches!(token_lifetime(200_000_000_000_000), Err(AppError::Internal(_))));
        assert!(matches!(token_lifetime(0), Err(AppError::Internal(_))));
        assert!(matches!(token_lifetime(-5), Err(AppError::Internal(_))));
    }
}
