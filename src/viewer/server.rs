//! Viewer HTTP server
//!
//! Serves `GET /logs` behind Basic Auth: without a query it lists the daily
//! files newest-first, with `?file=<name>` it shows one file's contents. The
//! server reads the directory the facility owns without any locking.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tokio::sync::oneshot;
use tracing::{error, info};

use super::auth::{require_basic_auth, Credentials};
use super::files::{self, FileAccessError};
use super::render;

/// Shared state for the viewer handlers
#[derive(Clone)]
struct ViewerState {
    log_dir: Arc<PathBuf>,
}

/// Handle to control the running server
pub struct ServerHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    addr: SocketAddr,
}

impl ServerHandle {
    /// Get the address the server is listening on
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Shutdown the server gracefully
    pub fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            // Ignore error if receiver is already dropped
            let _ = tx.send(());
        }
        Ok(())
    }
}

/// Build the viewer router
pub fn router(log_dir: PathBuf, credentials: Credentials) -> Router {
    let state = ViewerState {
        log_dir: Arc::new(log_dir),
    };
    Router::new()
        .route("/logs", get(view_logs))
        .layer(middleware::from_fn_with_state(
            credentials,
            require_basic_auth,
        ))
        .with_state(state)
}

/// Start the viewer server
///
/// Returns a `ServerHandle` that can be used to shut down the server.
pub async fn start(
    addr: SocketAddr,
    log_dir: PathBuf,
    credentials: Credentials,
) -> Result<ServerHandle> {
    let app = router(log_dir, credentials);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    info!("Log viewer listening on {}", bound_addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
                info!("Log viewer shutting down");
            })
            .await
            .ok();
    });

    Ok(ServerHandle {
        shutdown_tx: Some(shutdown_tx),
        addr: bound_addr,
    })
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    file: Option<String>,
}

/// GET /logs handler: list the daily files, or show one when `?file=` is set
async fn view_logs(State(state): State<ViewerState>, Query(query): Query<ViewQuery>) -> Response {
    match query.file {
        Some(name) => match files::read_log_file(&state.log_dir, &name) {
            Ok(content) => Html(render::file_page(&name, &content)).into_response(),
            Err(FileAccessError::InvalidName | FileAccessError::NotFound) => {
                (StatusCode::NOT_FOUND, "Log file not found").into_response()
            }
            Err(e) => {
                error!("failed to read log file: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read log file").into_response()
            }
        },
        None => match files::list_log_files(&state.log_dir) {
            Ok(names) => Html(render::list_page(&names)).into_response(),
            Err(e) => {
                error!("failed to list log directory: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to read log directory",
                )
                    .into_response()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::auth::basic_auth_header;
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_credentials() -> Credentials {
        Credentials {
            user: "admin".to_string(),
            pass: "s3cret".to_string(),
        }
    }

    fn test_router(temp_dir: &TempDir) -> Router {
        router(temp_dir.path().to_path_buf(), test_credentials())
    }

    fn authed_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, basic_auth_header("admin", "s3cret"))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn write_log(temp_dir: &TempDir, name: &str, content: &str) {
        File::create(temp_dir.path().join(name))
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
    }

    #[tokio::test]
    async fn test_unauthenticated_request_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_router(&temp_dir);

        let request = Request::builder().uri("/logs").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let challenge = response
            .headers()
            .get(header::WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(challenge.starts_with("Basic"));
    }

    #[tokio::test]
    async fn test_wrong_credentials_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_router(&temp_dir);

        let request = Request::builder()
            .uri("/logs")
            .header(header::AUTHORIZATION, basic_auth_header("admin", "wrong"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_list_shows_files_latest_first() {
        let temp_dir = TempDir::new().unwrap();
        write_log(&temp_dir, "2026-08-22.log", "");
        write_log(&temp_dir, "2026-08-23.log", "");
        let app = test_router(&temp_dir);

        let response = app.oneshot(authed_request("/logs")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        let newest = body.find("2026-08-23.log").unwrap();
        let older = body.find("2026-08-22.log").unwrap();
        assert!(newest < older);
    }

    #[tokio::test]
    async fn test_view_file_contents() {
        let temp_dir = TempDir::new().unwrap();
        write_log(
            &temp_dir,
            "2026-08-23.log",
            "[2026-08-23 14:30:45] [INFO] [payments] charge 42 succeeded\n",
        );
        let app = test_router(&temp_dir);

        let response = app
            .oneshot(authed_request("/logs?file=2026-08-23.log"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Viewing Log: 2026-08-23.log"));
        assert!(body.contains("[INFO] [payments] charge 42 succeeded"));
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_router(&temp_dir);

        let response = app
            .oneshot(authed_request("/logs?file=2026-01-01.log"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_traversal_name_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let app = test_router(&temp_dir);

        let response = app
            .oneshot(authed_request("/logs?file=../../etc/passwd.log"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_starts_and_shuts_down() {
        let temp_dir = TempDir::new().unwrap();

        // Port 0 lets the OS assign an available port
        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let handle = start(addr, temp_dir.path().to_path_buf(), test_credentials())
            .await
            .unwrap();
        let bound = handle.addr();
        assert!(bound.port() > 0);

        assert!(tokio::net::TcpStream::connect(bound).await.is_ok());

        handle.shutdown().unwrap();
        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        assert!(tokio::net::TcpStream::connect(bound).await.is_err());
    }
}
