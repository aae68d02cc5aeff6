//! # spa_file_server
//!
//! Backend utility layer for a web application.
//!
//! This crate provides:
//! - A static file server with single-page-application fallback (`web::file_server`)
//! - The status-code interception rule behind it (`web::fallback`)
//! - Environment-driven configuration (`config`)
//! - A small data-store port with a MySQL adapter (`db`)
//! - Auxiliary helpers: password strength, profanity filtering and
//!   mock-user seeding (`utils`)
//!
//! ## Example usage
//!
//! ```rust,no_run
//! use spa_file_server::config::server::FileServerConfig;
//! use spa_file_server::web::file_server::router;
//!
//! let cfg = FileServerConfig::from_segments(true, ["..", "frontend", "dist"]).unwrap();
//! let app: spa_file_server::axum::Router = router(cfg);
//! ```

// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use axum;
pub use dotenvy;
pub use mysql;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;

// ===============================
// Public modules
// ===============================
pub mod config;
pub mod db;
pub mod error;
pub mod utils;
pub mod web;
