use crate::config::Config;
use crate::db::{self, Database};
use crate::error::Result;

/// The application's state.
///
/// Holds no per-request data; every handler reads committed rows through the
/// pool and nothing is cached between requests.
#[derive(Clone)]
pub struct AppState {
    /// The pooled data access layer.
    pub db: Database,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub fn new(config: &Config) -> Result<Self> {
        let pool = db::create_pool(
            &config.database_url,
            config.db_pool_max_size,
            config.db_timeout,
        )?;
        tracing::info!(
            "✅ PostgreSQL pool initialized (max {} connections)",
            config.db_pool_max_size
        );

        Ok(AppState {
            db: Database::new(pool, config.db_timeout),
            config: config.clone(),
        })
    }
}
