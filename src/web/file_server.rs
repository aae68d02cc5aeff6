//! # Static File Server
//!
//! Serves files under a root directory and hands every miss to the
//! status-code fallback in [`crate::web::fallback`].
//!
//! Application routes (typically under `/api`) are registered on the
//! router first; anything they do not match is looked up on disk by
//! [`ServeDir`], which answers existing files with `Last-Modified` and
//! conditional-request support and falls through with an empty `404`
//! otherwise. Methods other than `GET`/`HEAD` always fall through.
//!
//! # Example
//! ```rust,no_run
//! use axum::{routing::get, Router};
//! use spa_file_server::web::file_server::start;
//!
//! let api = Router::new().route("/api/health", get(|| async { "ok" }));
//! let app = start(api, true, ["..", "frontend", "dist"]).expect("cwd");
//! ```
use std::path::Path;

use axum::{handler::HandlerWithoutStateExt, middleware, Router};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;

use crate::config::{server::FileServerConfig, web::HttpConfig};
use crate::error::server::FileServerError;
use crate::web::fallback::{not_found, status_code_pages, FallbackRouter};

/// Builds a router that only serves static files (plus the fallback).
pub fn router(config: FileServerConfig) -> Router {
    with_static_files(Router::new(), config)
}

/// Attaches the static file layer and the fallback to an existing router.
///
/// The fallback layer wraps every route, so empty error responses from
/// application handlers are rewritten as well.
pub fn with_static_files(app: Router, config: FileServerConfig) -> Router {
    tracing::info!(
        root = %config.root_directory.display(),
        is_spa = config.is_spa,
        "static file server configured"
    );
    if config.is_spa && !config.index_html().is_file() {
        tracing::warn!(
            index = %config.index_html().display(),
            "SPA mode enabled but index.html is missing"
        );
    }

    let serve_dir = ServeDir::new(&config.root_directory)
        .call_fallback_on_method_not_allowed(true)
        .fallback(not_found.into_service());
    let fallback = FallbackRouter::new(config);

    app.fallback_service(serve_dir)
        .layer(middleware::from_fn_with_state(fallback, status_code_pages))
}

/// Attaches the file server to `app`, rooted at the current working
/// directory joined with `path_parts`.
///
/// # Errors
/// Returns an error if the current working directory cannot be read.
pub fn start<I, S>(app: Router, is_spa: bool, path_parts: I) -> anyhow::Result<Router>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    let config = FileServerConfig::from_segments(is_spa, path_parts)?;
    Ok(with_static_files(app, config))
}

/// Binds `http.bind_addr` and serves `app` until the process stops.
pub async fn serve(app: Router, http: &HttpConfig) -> Result<(), FileServerError> {
    let listener = TcpListener::bind(&http.bind_addr)
        .await
        .map_err(|source| FileServerError::Bind {
            addr: http.bind_addr.clone(),
            source,
        })?;

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "listening");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
        routing::get,
        Json,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const INDEX: &str = "<!doctype html><html><body><div id=\"app\"></div></body></html>";

    static SEQ: AtomicUsize = AtomicUsize::new(0);

    fn unique_temp_root() -> PathBuf {
        let mut p = std::env::temp_dir();
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        p.push(format!("spa-file-server-test-{stamp}-{seq}"));
        p
    }

    fn site() -> PathBuf {
        let root = unique_temp_root();
        fs::create_dir_all(root.join("assets")).unwrap();
        fs::write(root.join("index.html"), INDEX).unwrap();
        fs::write(root.join("app.js"), "console.log('hi');").unwrap();
        fs::write(root.join("assets/style.css"), "body{}").unwrap();
        root
    }

    fn app(root: &Path, is_spa: bool) -> Router {
        let api = Router::new()
            .route("/api/health", get(|| async { "ok" }))
            .route(
                "/api/boom",
                get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
            )
            .route(
                "/api/invalid",
                get(|| async {
                    (
                        StatusCode::BAD_REQUEST,
                        Json(serde_json::json!({ "error": "name is required" })),
                    )
                }),
            )
            .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
        with_static_files(api, FileServerConfig::new(is_spa, root))
    }

    async fn get_path(app: Router, path: &str) -> (StatusCode, Option<String>, String) {
        send(app, Method::GET, path).await
    }

    async fn send(
        app: Router,
        method: Method,
        path: &str,
    ) -> (StatusCode, Option<String>, String) {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();

        let status = res.status();
        let content_type = res
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn client_route_gets_spa_shell() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, true), "/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ct.as_deref(), Some("text/html"));
        assert_eq!(body, INDEX);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn nested_client_route_gets_spa_shell() {
        let root = site();
        let (status, _, body) = get_path(app(&root, true), "/users/42/edit").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn spa_shell_is_read_fresh_each_time() {
        let root = site();
        let app = app(&root, true);

        let (_, _, first) = get_path(app.clone(), "/a").await;
        fs::write(root.join("index.html"), "<p>v2</p>").unwrap();
        let (_, _, second) = get_path(app, "/b").await;

        assert_eq!(first, INDEX);
        assert_eq!(second, "<p>v2</p>");

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn existing_files_are_served_verbatim() {
        let root = site();

        let (status, ct, body) = get_path(app(&root, true), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ct.unwrap().contains("javascript"));
        assert_eq!(body, "console.log('hi');");

        let (status, ct, body) = get_path(app(&root, true), "/assets/style.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(ct.unwrap().starts_with("text/css"));
        assert_eq!(body, "body{}");

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn root_serves_index_html() {
        let root = site();
        let (status, _, body) = get_path(app(&root, false), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn missing_file_is_json_404_even_in_spa_mode() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, true), "/missing.css").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(ct.as_deref(), Some("text/html"));
        assert_eq!(body, r#"{"error":"404. Not found."}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn version_like_segment_is_treated_as_file() {
        let root = site();
        let (status, _, body) = get_path(app(&root, true), "/v1.2/foo").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"404. Not found."}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn unknown_api_path_is_json_404() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, true), "/api/users/999").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(ct.as_deref(), Some("application/json"));
        assert_eq!(body, r#"{"error":"404. Not found."}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn non_get_unknown_api_path_is_json_404() {
        let root = site();

        for method in [Method::POST, Method::PUT, Method::DELETE] {
            let (status, ct, body) = send(app(&root, true), method, "/api/users/999").await;
            assert_eq!(status, StatusCode::NOT_FOUND);
            assert_eq!(ct.as_deref(), Some("application/json"));
            assert_eq!(body, r#"{"error":"404. Not found."}"#);
        }

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn non_get_client_route_gets_spa_shell() {
        let root = site();
        let (status, ct, body) = send(app(&root, true), Method::POST, "/dashboard").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ct.as_deref(), Some("text/html"));
        assert_eq!(body, INDEX);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn non_get_on_existing_file_is_404() {
        let root = site();
        let (status, _, body) = send(app(&root, false), Method::POST, "/app.js").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"error":"404. Not found."}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn api_server_error_keeps_status() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, true), "/api/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ct.as_deref(), Some("application/json"));
        assert_eq!(body, r#"{"error":"Status code: 500"}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn non_api_server_error_is_json() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, true), "/boom").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ct.as_deref(), Some("application/json"));
        assert_eq!(body, r#"{"error":"Status code: 500"}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn handler_error_bodies_pass_through() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, true), "/api/invalid").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(ct.as_deref(), Some("application/json"));
        assert_eq!(body, r#"{"error":"name is required"}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn api_success_is_untouched() {
        let root = site();
        let (status, _, body) = get_path(app(&root, true), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn non_spa_client_route_is_404() {
        let root = site();
        let (status, ct, body) = get_path(app(&root, false), "/dashboard").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(ct.as_deref(), Some("text/html"));
        assert_eq!(body, r#"{"error":"404. Not found."}"#);

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn spa_without_index_is_server_error() {
        let root = unique_temp_root();
        fs::create_dir_all(&root).unwrap();

        let (status, _, body) = get_path(app(&root, true), "/dashboard").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");

        let _ = fs::remove_dir_all(&root);
    }

    #[tokio::test]
    async fn router_without_api_routes_serves_files() {
        let root = site();
        let app = router(FileServerConfig::new(true, &root));

        let (status, _, body) = get_path(app.clone(), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('hi');");

        let (status, _, body) = get_path(app, "/settings").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn start_roots_at_working_directory() {
        let app = start(Router::new(), false, ["www"]);
        assert!(app.is_ok());
    }
}
