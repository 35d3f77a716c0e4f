use serde::Serialize;
use tokio_postgres::Row;

use crate::{db::column, error::AppError};

/// The columns needed to check a customer's login.
#[derive(Debug, Clone)]
pub struct CustomerCredentials {
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub given_name: Option<String>,
    pub surname: Option<String>,
}

impl CustomerCredentials {
    /// Given name and surname joined by a space, skipping missing parts.
    pub fn display_name(&self) -> String {
        [self.given_name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl TryFrom<&Row> for CustomerCredentials {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            given_name: column(row, "given_name")?,
            surname: column(row, "surname")?,
        })
    }
}

/// A customer row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub given_name: String,
    pub surname: String,
    pub email: String,
    pub password_hash: String,
}

/// One of the caller's orders.
#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    #[serde(rename = "OrderKey")]
    pub order_key: i64,
    /// `YYYY-MM-DD`.
    #[serde(rename = "Fecha")]
    pub date: String,
    #[serde(rename = "CantidadItems")]
    pub item_count: i64,
    #[serde(rename = "Total")]
    pub total: f64,
    /// Shipping country.
    #[serde(rename = "Pais")]
    pub country: Option<String>,
}

impl TryFrom<&Row> for Purchase {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self, Self::Error> {
        Ok(Self {
            order_key: column(row, "order_key")?,
            date: column(row, "order_date")?,
            item_count: column(row, "item_count")?,
            total: column(row, "total")?,
            country: column(row, "country")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(given: Option<&str>, surname: Option<&str>) -> CustomerCredentials {
        CustomerCredentials {
            email: "ana@contoso.test".to_string(),
            password_hash: String::new(),
            given_name: given.map(str::to_string),
            surname: surname.map(str::to_string),
        }
    }

    #[test]
    fn display_name_joins_given_and_surname() {
        assert_eq!(credentials(Some("Ana"), Some("Pérez")).display_name(), "Ana Pérez");
    }

    #[test]
    fn display_name_skips_missing_parts() {
        assert_eq!(credentials(None, Some("Pérez")).display_name(), "Pérez");
        assert_eq!(credentials(Some("Ana "), Some("")).display_name(), "Ana");
        assert_eq!(credentials(None, None).display_name(), "");
    }
}
