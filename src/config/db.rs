//! # Database Configuration and Pool Factory
//!
//! Connection settings for the data store used by the mock-user helpers,
//! plus a factory for a shared MySQL pool.
//!
//! The server itself never touches the database; a missing `DATABASE_URL`
//! only matters to callers of [`create_pool`].
//!
//! # Examples
//! ```rust,no_run
//! use spa_file_server::config::db::{DbConfig, create_pool};
//!
//! let cfg = DbConfig::from_env();
//! if cfg.is_valid() {
//!     let pool = create_pool(&cfg).expect("failed to create pool");
//! }
//! ```

use std::sync::Arc;

use anyhow::Context;
use mysql::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts};

use crate::config::env::read_u32_from;

/// Database connection configuration.
///
/// Reads from environment variables:
/// - `DATABASE_URL` — MySQL connection URL
/// - `DATABASE_MAX_CONN` — optional maximum pool size
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
}

impl DbConfig {
    /// Builds a [`DbConfig`] from environment variables.
    pub fn from_env() -> Self {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Builds a [`DbConfig`] using a custom key provider.
    pub fn from_env_with<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = get("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let max_connections = read_u32_from(&get, "DATABASE_MAX_CONN");
        Self {
            url,
            max_connections,
        }
    }

    /// Returns `true` if `DATABASE_URL` is present.
    pub fn is_valid(&self) -> bool {
        self.url.is_some()
    }
}

/// Shared database pool type alias (`Arc<mysql::Pool>`).
pub type DbPool = Arc<Pool>;

/// Creates a new [`DbPool`] using the given configuration.
///
/// # Errors
/// Returns an error if `DATABASE_URL` is missing, the URL is invalid,
/// or the pool cannot be created.
pub fn create_pool(cfg: &DbConfig) -> anyhow::Result<DbPool> {
    let url = cfg
        .url
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let opts = Opts::from_url(url).context("invalid DATABASE_URL")?;

    let mut builder = OptsBuilder::from_opts(opts);
    if let Some(max) = cfg.max_connections.filter(|m| *m > 0) {
        let constraints = PoolConstraints::new(1, max as usize)
            .ok_or_else(|| anyhow::anyhow!("invalid DATABASE_MAX_CONN: {max}"))?;
        builder = builder.pool_opts(PoolOpts::default().with_constraints(constraints));
    }

    let pool = Pool::new(Opts::from(builder)).context("failed to create MySQL pool")?;
    Ok(Arc::new(pool))
}
