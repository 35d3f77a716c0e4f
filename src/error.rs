use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// A connection pool error.
    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// The pool could not be built from the configuration.
    #[error("Pool creation error: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    /// A query did not finish within the configured timeout.
    #[error("Database query timed out")]
    Timeout,

    /// A column was missing or had an unexpected type.
    #[error("Missing or malformed column: {0}")]
    MissingData(String),

    /// Bad credentials on login.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Missing, malformed, forged or expired bearer token.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Authenticated, but the role does not grant access.
    #[error("Forbidden")]
    Forbidden,

    /// A validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Registration with an email that already exists.
    #[error("Email already registered")]
    DuplicateEmail,

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Pool(ref e) => {
                tracing::error!("Pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable".to_string())
            }

            AppError::CreatePool(ref e) => {
                tracing::error!("Pool creation error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable".to_string())
            }

            AppError::Timeout => {
                tracing::error!("Database query timed out");
                (StatusCode::GATEWAY_TIMEOUT, "Database timeout".to_string())
            }

            AppError::MissingData(ref column) => {
                tracing::error!("Row mapping failed on column: {}", column);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }

            AppError::Authentication(ref msg) => {
                tracing::warn!("Authentication failed: {}", msg);
                (StatusCode::UNAUTHORIZED, msg.clone())
            }

            AppError::InvalidToken(ref reason) => {
                tracing::warn!("Rejected bearer token: {}", reason);
                (StatusCode::UNAUTHORIZED, "Could not validate credentials".to_string())
            }

            AppError::Forbidden => {
                tracing::warn!("Authorization failed");
                (StatusCode::FORBIDDEN, "Forbidden".to_string())
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::DuplicateEmail => {
                tracing::debug!("Duplicate registration attempt");
                (StatusCode::BAD_REQUEST, "Email already registered".to_string())
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = sonic_rs::to_string(&sonic_rs::json!({
            "error": message
        }))
        .unwrap_or_else(|_| r#"{"error":"Internal server error"}"#.to_string());

        let mut response = (
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }

        response
    }
}
