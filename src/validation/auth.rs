use garde::Validate;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// The request payload for customer registration.
#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[garde(length(chars, min = 1, max = 100), custom(not_blank))]
    pub first_name: String,
    #[garde(length(chars, min = 1, max = 100), custom(not_blank))]
    pub last_name: String,
    #[garde(email, length(max = 255))]
    pub email: String,
    #[garde(length(min = 8, max = 128))]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

/// Validates a registration payload.
///
/// # Returns
///
/// A `Result<()>`; the error message lists every failing field.
pub fn validate_registration(request: &RegisterRequest) -> Result<()> {
    request
        .validate()
        .map_err(|report| AppError::Validation(report.to_string()))
}
