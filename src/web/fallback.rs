//! # Status-Code Fallback
//!
//! Decides what a response looks like once normal routing has given up.
//!
//! Every response that leaves the router with a `4xx`/`5xx` status and an
//! empty body is rewritten here:
//!
//! - `/api` paths always get a JSON `{"error": ...}` body.
//! - In SPA mode, a `404` for anything that does not look like a file is
//!   answered with `200` and the contents of `index.html`, so client-side
//!   routing can take over.
//! - Everything else gets the JSON error body with its status unchanged.
//!
//! Responses that already carry a body (e.g. a handler returning its own
//! JSON error) pass through untouched.
//!
//! # Example
//! ```rust
//! use axum::http::StatusCode;
//! use spa_file_server::web::fallback::{decide, Fallback};
//!
//! assert_eq!(decide("/dashboard", StatusCode::NOT_FOUND, true), Fallback::SpaShell);
//! assert_eq!(
//!     decide("/api/users/999", StatusCode::NOT_FOUND, true),
//!     Fallback::Error {
//!         status: StatusCode::NOT_FOUND,
//!         content_type: "application/json",
//!         message: "404. Not found.".into(),
//!     }
//! );
//! ```
use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::server::FileServerConfig;
use crate::error::server::FileServerError;

/// Path prefix reserved for machine-readable responses.
pub const API_PREFIX: &str = "/api";

/// Body text for `404` responses.
pub const NOT_FOUND_MESSAGE: &str = "404. Not found.";

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// Returns `true` if `path` is inside the [`API_PREFIX`] namespace.
///
/// Matching is per segment and ASCII case-insensitive: `/api`, `/api/`
/// and `/API/users` match, `/apiXYZ` and `/v1/api` do not.
pub fn is_in_api(path: &str) -> bool {
    let n = API_PREFIX.len();
    match path.get(..n) {
        Some(head) if head.eq_ignore_ascii_case(API_PREFIX) => {
            matches!(path.as_bytes().get(n), None | Some(b'/'))
        }
        _ => false,
    }
}

/// Returns `true` if `path` looks like a request for a static file.
///
/// This is a coarse heuristic: any `.` anywhere in the path counts, so
/// `/app.js` and `/logo.png` match, but so do version-like segments such
/// as `/v1.2/foo` or `/users/john.doe`. Those paths never receive the SPA
/// shell.
pub fn is_file_path(path: &str) -> bool {
    path.contains('.')
}

/// Error text written for `status`.
pub fn error_message(status: StatusCode) -> String {
    if status == StatusCode::NOT_FOUND {
        NOT_FOUND_MESSAGE.to_string()
    } else {
        format!("Status code: {}", status.as_u16())
    }
}

/// Content type used for the error body.
///
/// JSON for the API namespace and for every status other than `404`;
/// HTML otherwise.
pub fn error_content_type(in_api: bool, status: StatusCode) -> &'static str {
    if in_api || status != StatusCode::NOT_FOUND {
        CONTENT_TYPE_JSON
    } else {
        CONTENT_TYPE_HTML
    }
}

/// Outcome of the fallback rule for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Serve `index.html` with `200 OK`.
    SpaShell,
    /// Write `{"error": message}` with the original status.
    Error {
        status: StatusCode,
        content_type: &'static str,
        message: String,
    },
}

/// Applies the fallback rule to a request path and the status the
/// routing pipeline arrived at.
pub fn decide(path: &str, status: StatusCode, is_spa: bool) -> Fallback {
    let in_api = is_in_api(path);
    let file_path = is_file_path(path);

    if is_spa && !file_path && status == StatusCode::NOT_FOUND && !in_api {
        return Fallback::SpaShell;
    }

    Fallback::Error {
        status,
        content_type: error_content_type(in_api, status),
        message: error_message(status),
    }
}

/// Returns `true` if nothing upstream produced a body for an error status.
///
/// Only these responses are rewritten by [`status_code_pages`].
pub fn is_unhandled(response: &Response) -> bool {
    let status = response.status();
    (status.is_client_error() || status.is_server_error())
        && response.body().size_hint().exact() == Some(0)
}

/// Renders fallback responses for one [`FileServerConfig`].
///
/// Cheap to clone; the configuration is shared behind an `Arc`.
#[derive(Clone, Debug)]
pub struct FallbackRouter {
    config: Arc<FileServerConfig>,
}

impl FallbackRouter {
    pub fn new(config: FileServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &FileServerConfig {
        &self.config
    }

    /// Builds the final response for an unhandled `status` on `path`.
    ///
    /// `index.html` is read from disk on every SPA fallback.
    ///
    /// # Errors
    /// Returns [`FileServerError::IndexUnreadable`] when SPA mode needs
    /// `index.html` and it cannot be read.
    pub async fn handle_unhandled_response(
        &self,
        path: &str,
        status: StatusCode,
    ) -> Result<Response, FileServerError> {
        match decide(path, status, self.config.is_spa) {
            Fallback::SpaShell => {
                let index = self.config.index_html();
                let html = tokio::fs::read(&index)
                    .await
                    .map_err(|source| FileServerError::IndexUnreadable {
                        path: index,
                        source,
                    })?;
                tracing::debug!(path, "serving SPA shell");

                Ok((
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, CONTENT_TYPE_HTML)],
                    Body::from(html),
                )
                    .into_response())
            }
            Fallback::Error {
                status,
                content_type,
                message,
            } => {
                tracing::debug!(path, status = status.as_u16(), "writing error body");
                let body = serde_json::json!({ "error": message }).to_string();

                Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response())
            }
        }
    }
}

/// Empty `404` for requests no route or file answers.
///
/// Used as the [`ServeDir`](tower_http::services::ServeDir) fallback, also
/// for methods other than `GET`/`HEAD`, so such requests reach
/// [`status_code_pages`] as a plain miss rather than a `405`.
pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}

/// Axum middleware that rewrites unhandled error responses.
///
/// Install with `axum::middleware::from_fn_with_state(fallback, status_code_pages)`.
/// Headers set upstream (e.g. `Allow` on `405`) are kept; status, content
/// type and body come from [`FallbackRouter::handle_unhandled_response`].
pub async fn status_code_pages(
    State(fallback): State<FallbackRouter>,
    req: Request,
    next: Next,
) -> Result<Response, FileServerError> {
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    if !is_unhandled(&response) {
        return Ok(response);
    }

    let rendered = fallback
        .handle_unhandled_response(&path, response.status())
        .await?;

    let (mut parts, _) = response.into_parts();
    let (rendered_parts, body) = rendered.into_parts();
    parts.status = rendered_parts.status;
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.extend(rendered_parts.headers);

    Ok(Response::from_parts(parts, body))
}
