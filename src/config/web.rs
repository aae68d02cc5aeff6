//! # HTTP Listener Configuration
//!
//! Defines where the HTTP server listens.
//!
//! Typically included within [`AppConfig`](crate::config::app::AppConfig).
//!
//! # Examples
//! ```rust
//! use spa_file_server::config::web::HttpConfig;
//!
//! let http = HttpConfig { bind_addr: "0.0.0.0:8080".into() };
//! assert_eq!(http.bind_addr, "0.0.0.0:8080");
//! ```

/// Default listen address when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5173";

/// HTTP-related configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpConfig {
    /// Socket address passed to `tokio::net::TcpListener::bind`.
    pub bind_addr: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
        }
    }
}
