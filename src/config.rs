use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use zeroize::{Zeroize, Zeroizing};

/// Origins allowed when `CORS_ORIGINS` is not set.
const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://localhost:3000,http://127.0.0.1:5173,http://127.0.0.1:3000";

/// Token lifetime bounds in minutes: one minute to one week.
const TOKEN_TTL_RANGE: RangeInclusive<i64> = 1..=10_080;
/// Catalog sample bounds.
const CATALOG_SAMPLE_RANGE: RangeInclusive<i64> = 1..=1_000;
/// Database timeout bounds in seconds.
const DB_TIMEOUT_RANGE: RangeInclusive<u64> = 1..=300;
/// Pool size bounds.
const DB_POOL_RANGE: RangeInclusive<usize> = 1..=1_024;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// The HMAC key used to sign session tokens.
    pub token_secret: Zeroizing<Vec<u8>>,
    /// The lifetime of a session token in minutes.
    pub token_ttl_minutes: i64,
    /// The administrator login name.
    pub admin_username: String,
    /// The Argon2 PHC string of the administrator password.
    pub admin_password_hash: String,
    /// The display name placed in administrator tokens.
    pub admin_display_name: String,
    /// The frozen date that date windows count back from.
    pub reference_date: NaiveDate,
    /// Origins allowed to call the API from a browser.
    pub cors_origins: Vec<String>,
    /// The maximum number of pooled database connections.
    pub db_pool_max_size: usize,
    /// Bound on pool waits, connects and individual queries.
    pub db_timeout: Duration,
    /// The number of products returned by the catalog.
    pub catalog_sample_size: i64,
    /// Seconds after which one spent login attempt is replenished, per peer.
    pub login_replenish_secs: u64,
    /// Login burst allowance per peer.
    pub login_rate_burst: u32,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut secret_hex = env::var("TOKEN_SECRET")
            .context("TOKEN_SECRET must be set (generate with: openssl rand -hex 32)")?;

        let secret_bytes = hex::decode(&secret_hex)
            .context("TOKEN_SECRET must be valid hexadecimal")?;

        secret_hex.zeroize();

        if secret_bytes.len() < 32 {
            anyhow::bail!("TOKEN_SECRET must be at least 32 bytes (64 hex characters)");
        }

        let admin_password_hash = env::var("ADMIN_PASSWORD_HASH")
            .context("ADMIN_PASSWORD_HASH must be set to an Argon2 PHC string")?;
        argon2::PasswordHash::new(&admin_password_hash)
            .map_err(|e| anyhow::anyhow!("ADMIN_PASSWORD_HASH is not a valid PHC string: {}", e))?;

        let reference_date = env_or("REFERENCE_DATE", "2021-01-01");
        let reference_date = NaiveDate::parse_from_str(&reference_date, "%Y-%m-%d")
            .context("REFERENCE_DATE must be formatted as YYYY-MM-DD")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            bind_addr: env_or("BIND_ADDR", "127.0.0.1:8000")
                .parse()
                .context("Invalid BIND_ADDR")?,
            token_secret: Zeroizing::new(secret_bytes),
            token_ttl_minutes: parse_bounded(
                "TOKEN_TTL_MINUTES",
                &env_or("TOKEN_TTL_MINUTES", "30"),
                TOKEN_TTL_RANGE,
            )?,
            admin_username: env_or("ADMIN_USERNAME", "admin"),
            admin_password_hash,
            admin_display_name: env_or("ADMIN_DISPLAY_NAME", "Administrador"),
            reference_date,
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGINS)),
            db_pool_max_size: parse_bounded(
                "DB_POOL_MAX_SIZE",
                &env_or("DB_POOL_MAX_SIZE", "16"),
                DB_POOL_RANGE,
            )?,
            db_timeout: Duration::from_secs(parse_bounded(
                "DB_TIMEOUT_SECS",
                &env_or("DB_TIMEOUT_SECS", "5"),
                DB_TIMEOUT_RANGE,
            )?),
            catalog_sample_size: parse_bounded(
                "CATALOG_SAMPLE_SIZE",
                &env_or("CATALOG_SAMPLE_SIZE", "24"),
                CATALOG_SAMPLE_RANGE,
            )?,
            login_replenish_secs: env_or("LOGIN_REPLENISH_SECS", "2")
                .parse()
                .context("Invalid LOGIN_REPLENISH_SECS")?,
            login_rate_burst: env_or("LOGIN_RATE_BURST", "10")
                .parse()
                .context("Invalid LOGIN_RATE_BURST")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses a numeric setting and rejects values outside `range`.
fn parse_bounded<T>(key: &str, raw: &str, range: RangeInclusive<T>) -> Result<T>
where
    T: FromStr + PartialOrd + Display,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value: T = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid {}", key))?;

    if !range.contains(&value) {
        anyhow::bail!(
            "{} must be between {} and {}, got {}",
            key,
            range.start(),
            range.end(),
            value
        );
    }

    Ok(value)
}

/// Splits a comma-separated origin list, dropping blanks.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origins_cover_local_dev_servers() {
        let origins = parse_origins(DEFAULT_CORS_ORIGINS);
        assert_eq!(origins.len(), 4);
        assert!(origins.contains(&"http://localhost:5173".to_string()));
        assert!(origins.contains(&"http://127.0.0.1:3000".to_string()));
    }

    #[test]
    fn token_ttl_outside_bounds_is_rejected() {
        for raw in ["0", "-5", "10081", "200000000000000"] {
            let err = parse_bounded("TOKEN_TTL_MINUTES", raw, TOKEN_TTL_RANGE).unwrap_err();
            assert!(err.to_string().contains("TOKEN_TTL_MINUTES"), "{}", err);
        }
        assert_eq!(parse_bounded("TOKEN_TTL_MINUTES", "30", TOKEN_TTL_RANGE).unwrap(), 30);
        assert_eq!(parse_bounded("TOKEN_TTL_MINUTES", "10080", TOKEN_TTL_RANGE).unwrap(), 10_080);
    }

    #[test]
    fn catalog_sample_size_must_be_positive() {
        assert!(parse_bounded("CATALOG_SAMPLE_SIZE", "-1", CATALOG_SAMPLE_RANGE).is_err());
        assert!(parse_bounded("CATALOG_SAMPLE_SIZE", "0", CATALOG_SAMPLE_RANGE).is_err());
        assert!(parse_bounded("CATALOG_SAMPLE_SIZE", "1001", CATALOG_SAMPLE_RANGE).is_err());
        assert_eq!(parse_bounded("CATALOG_SAMPLE_SIZE", "24", CATALOG_SAMPLE_RANGE).unwrap(), 24);
    }

    #[test]
    fn zero_timeout_and_pool_size_are_rejected() {
        assert!(parse_bounded("DB_TIMEOUT_SECS", "0", DB_TIMEOUT_RANGE).is_err());
        assert!(parse_bounded("DB_TIMEOUT_SECS", "-3", DB_TIMEOUT_RANGE).is_err());
        assert_eq!(parse_bounded("DB_TIMEOUT_SECS", "5", DB_TIMEOUT_RANGE).unwrap(), 5);
        assert!(parse_bounded("DB_POOL_MAX_SIZE", "0", DB_POOL_RANGE).is_err());
    }

    #[test]
    fn non_numeric_setting_names_the_key() {
        let err = parse_bounded("TOKEN_TTL_MINUTES", "soon", TOKEN_TTL_RANGE).unwrap_err();
        assert_eq!(err.to_string(), "Invalid TOKEN_TTL_MINUTES");
    }

    #[test]
    fn origins_are_trimmed_and_blanks_dropped() {
        let origins = parse_origins(" http://a.test ,, http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }
}
