use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Extension,
};

use crate::{
    error::Result,
    models::identity::Claims,
    response,
    services::catalog as catalog_service,
    state::AppState,
};

/// `GET /productos`
pub async fn catalog(State(state): State<AppState>) -> Result<Response> {
    let products = catalog_service::catalog(&state).await?;
    response::json(StatusCode::OK, &products)
}

/// `GET /destacados`
pub async fn trending(State(state): State<AppState>) -> Result<Response> {
    let products = catalog_service::trending(&state).await?;
    response::json(StatusCode::OK, &products)
}

/// `GET /mis-compras`, scoped to the token subject.
pub async fn my_purchases(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Response> {
    tracing::debug!("🧾 Purchase history for: {}", claims.sub);
    let purchases = catalog_service::purchases(&state, &claims.sub).await?;
    response::json(StatusCode::OK, &purchases)
}
