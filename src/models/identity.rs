use serde::{Deserialize, Serialize};
use std::fmt;

/// The role carried in a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full reporting access.
    Admin,
    /// Catalog and own purchase history only.
    Cliente,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Cliente => f.write_str("cliente"),
        }
    }
}

/// An authenticated subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// The administrator username or the customer's email.
    pub subject: String,
    /// The subject's role.
    pub role: Role,
    /// The name shown by clients.
    pub display_name: String,
}

/// The claims embedded in a signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: username or email.
    pub sub: String,
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
