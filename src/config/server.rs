//! # File Server Configuration
//!
//! Startup configuration for the static file server and its SPA fallback.
//!
//! The root directory is built by joining the process working directory
//! with zero or more path segments, so the same deployment layout works
//! regardless of where the frontend build ends up.
//!
//! # Examples
//! ```rust
//! use std::path::PathBuf;
//! use spa_file_server::config::server::FileServerConfig;
//!
//! let cfg = FileServerConfig::new(true, "/srv/www");
//! assert!(cfg.is_spa);
//! assert_eq!(cfg.index_html(), PathBuf::from("/srv/www/index.html"));
//! ```
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// File name of the SPA shell served on client-side routes.
pub const INDEX_HTML: &str = "index.html";

/// Configuration for [`file_server::router`](crate::web::file_server::router).
///
/// Fixed at startup and passed explicitly to the router; nothing here is
/// read from global state at request time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileServerConfig {
    /// Whether unmatched, non-API, non-file paths receive `index.html`.
    pub is_spa: bool,
    /// Absolute base path of the static assets.
    pub root_directory: PathBuf,
}

impl FileServerConfig {
    /// Creates a configuration with an explicit root directory.
    pub fn new(is_spa: bool, root_directory: impl Into<PathBuf>) -> Self {
        Self {
            is_spa,
            root_directory: root_directory.into(),
        }
    }

    /// Creates a configuration rooted at the current working directory
    /// joined with `segments`.
    ///
    /// # Errors
    /// Returns an error if the current working directory cannot be read.
    pub fn from_segments<I, S>(is_spa: bool, segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let cwd = std::env::current_dir().context("failed to read current working directory")?;
        Ok(Self::new(is_spa, join_segments(cwd, segments)))
    }

    /// Path of the SPA shell (`<root_directory>/index.html`).
    pub fn index_html(&self) -> PathBuf {
        self.root_directory.join(INDEX_HTML)
    }
}

/// Joins each segment onto `base` in order.
pub fn join_segments<I, S>(base: impl Into<PathBuf>, segments: I) -> PathBuf
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    segments
        .into_iter()
        .fold(base.into(), |path, part| path.join(part))
}
