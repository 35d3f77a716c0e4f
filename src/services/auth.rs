use crate::config::Config;
use crate::db::{self, Database};
use crate::error::{AppError, Result};
use crate::models::customer::NewCustomer;
use crate::models::identity::{Identity, Role};
use crate::repositories::customer as customer_repo;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 2;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 1;

/// The one message every credential failure gets.
const INVALID_CREDENTIALS: &str = "Incorrect username or password";

/// Hashes a password using Argon2id.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the PHC-encoded hash.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng.fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Internal(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Internal(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Internal(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    Ok(password_hash)
}

/// Verifies a password against a PHC hash in constant time.
///
/// A hash that does not parse counts as a mismatch, so a corrupt row can
/// never authenticate.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    let mut password_bytes = password.as_bytes().to_vec();
    let result = Argon2::default()
        .verify_password(&password_bytes, &parsed_hash)
        .is_ok();

    password_bytes.zeroize();
    result
}

/// Runs [`hash_password`] on the blocking thread pool.
pub async fn hash_password_off_runtime(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || {
        let mut password = password;
        let hash = hash_password(&password);
        password.zeroize();
        hash
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// Runs [`verify_password`] on the blocking thread pool.
pub async fn verify_password_off_runtime(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || {
        let mut password = password;
        let matches = verify_password(&password, &hash);
        password.zeroize();
        matches
    })
    .await
    .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
}

/// Authenticates either the administrator or a registered customer.
///
/// The administrator is checked first, against configuration only. Any
/// other username is treated as a customer email.
///
/// # Returns
///
/// The `Identity` on success, `AppError::Authentication` with a generic
/// message on any mismatch.
pub async fn authenticate(
    db: &Database,
    config: &Config,
    username: &str,
    password: &str,
) -> Result<Identity> {
    tracing::debug!("🔐 Authenticating: {}", username);

    if username == config.admin_username
        && verify_password_off_runtime(password.to_string(), config.admin_password_hash.clone())
            .await?
    {
        tracing::info!("✅ Administrator authenticated");
        return Ok(Identity {
            subject: config.admin_username.clone(),
            role: Role::Admin,
            display_name: config.admin_display_name.clone(),
        });
    }

    let credentials = customer_repo::find_credentials_by_email(db, username)
        .await?
        .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password_off_runtime(password.to_string(), credentials.password_hash.clone()).await? {
        return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!("✅ Customer authenticated: {}", credentials.email);

    Ok(Identity {
        display_name: credentials.display_name(),
        subject: credentials.email,
        role: Role::Cliente,
    })
}

/// Registers a new customer after checking the email is unused.
///
/// The existence check runs first; the unique constraint on `email` catches
/// a concurrent registration that slips between check and insert.
pub async fn register_customer(
    db: &Database,
    first_name: String,
    last_name: String,
    email: String,
    password: &str,
) -> Result<()> {
    tracing::debug!("📝 Registering customer: {}", email);

    if customer_repo::email_exists(db, &email).await? {
        return Err(AppError::DuplicateEmail);
    }

    let customer = NewCustomer {
        given_name: first_name,
        surname: last_name,
        email,
        password_hash: hash_password_off_runtime(password.to_string()).await?,
    };

    match customer_repo::insert_customer(db, &customer).await {
        Ok(()) => {
            tracing::info!("✅ Customer registered: {}", customer.email);
            Ok(())
        }
        Err(e) if db::is_unique_violation(&e) => Err(AppError::DuplicateEmail),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("CorrectHorse42").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("CorrectHorse42", &hash));
        assert!(!verify_password("correcthorse42", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("CorrectHorse42").unwrap();
        let second = hash_password("CorrectHorse42").unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn off_runtime_helpers_match_inline_results() {
        let hash = hash_password_off_runtime("CorrectHorse42".to_string()).await.unwrap();
        assert!(verify_password("CorrectHorse42", &hash));
        assert!(verify_password_off_runtime("CorrectHorse42".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password_off_runtime("wrong".to_string(), hash).await.unwrap());
        assert!(!verify_password_off_runtime("x".to_string(), "not-a-phc".to_string()).await.unwrap());
    }

    #[test]
    fn plaintext_stored_value_never_matches() {
        assert!(!verify_password("secret", "secret"));
        assert!(!verify_password("", ""));
    }
}
