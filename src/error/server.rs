use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors raised by the file server that cannot be recovered into a
/// regular response.
///
/// Routing misses (404 and other non-2xx statuses) are never errors here;
/// they are rendered by the fallback. What remains are deployment
/// problems, such as SPA mode without a readable `index.html`.
///
/// # Example
/// ```
/// use std::io;
/// use spa_file_server::error::server::FileServerError;
///
/// let err = FileServerError::IndexUnreadable {
///     path: "/srv/www/index.html".into(),
///     source: io::Error::from(io::ErrorKind::NotFound),
/// };
/// assert!(err.to_string().contains("/srv/www/index.html"));
/// ```
#[derive(Debug, Error)]
pub enum FileServerError {
    /// SPA mode is enabled but the shell document could not be read.
    #[error("failed to read SPA shell {}", .path.display())]
    IndexUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The listener could not be bound.
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server loop terminated with an I/O error.
    #[error("server error")]
    Serve(#[from] std::io::Error),
}

impl IntoResponse for FileServerError {
    fn into_response(self) -> Response {
        let source = std::error::Error::source(&self);
        tracing::error!(error = %self, source = ?source, "file server error");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
