use axum::{http::StatusCode, response::Response};

use crate::{error::Result, response};

/// Liveness probe. Does not touch the database.
pub async fn status() -> Result<Response> {
    response::json(
        StatusCode::OK,
        &sonic_rs::json!({
            "status": "online",
            "mode": "Admin Time-Travel"
        }),
    )
}
