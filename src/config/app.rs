//! # Application Configuration Loader
//!
//! Unified configuration loader for the file server process: listener
//! address, SPA mode and static root.
//!
//! The server never opens a database. The mock-user helpers read
//! `DATABASE_URL` and `DATABASE_MAX_CONN` through
//! [`DbConfig::from_env`](crate::config::db::DbConfig::from_env) where they
//! create their pool.
//!
//! Automatically loads `.env` files for non-production environments.
//! It checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `APP_ENV` | Current environment (`development`, `production`, etc.) | `"development"` |
//! | `DOTENV_FILE` | Optional path to a custom dotenv file | *none* |
//! | `BIND_ADDR` | Listen address | `127.0.0.1:5173` |
//! | `SPA` | Serve `index.html` on unmatched client-side routes | `true` |
//! | `WWW_ROOT` | Static root, as segments joined onto the working directory | `www` |
//!
//! # Example
//! ```rust,no_run
//! use spa_file_server::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env().expect("config");
//! println!("serving {}", cfg.server.root_directory.display());
//! ```

use std::env;

use anyhow::Result;

use crate::config::{
    env::{read_flag, read_segments},
    server::FileServerConfig,
    web::{HttpConfig, DEFAULT_BIND_ADDR},
};

/// Static root used when `WWW_ROOT` is not set.
pub const DEFAULT_WWW_ROOT: &[&str] = &["www"];

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Current environment name.
    pub app_env: String,
    /// HTTP listener configuration.
    pub http: HttpConfig,
    /// Static file server and SPA fallback configuration.
    pub server: FileServerConfig,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// # Errors
    /// Returns an error if the current working directory cannot be read.
    pub fn from_env() -> Result<Self> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(path);
            } else {
                let candidate = format!(".env.{}", app_env);
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let is_spa = read_flag("SPA", true);
        let segments = read_segments("WWW_ROOT", DEFAULT_WWW_ROOT);

        Ok(AppConfig {
            app_env,
            http: HttpConfig { bind_addr },
            server: FileServerConfig::from_segments(is_spa, segments)?,
        })
    }
}
