//! HTTP front end: upload form, dashboard, document view and a JSON API.

pub mod api;
pub mod error;
pub mod handlers;
pub mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pipeline::Pipeline;

pub use api::ApiResponse;
pub use error::UploadError;

/// State shared by all routes.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub upload_dir: Arc<PathBuf>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: Pipeline, upload_dir: impl Into<PathBuf>, max_upload_bytes: usize) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            upload_dir: Arc::new(upload_dir.into()),
            max_upload_bytes,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/upload", post(handlers::upload))
        .route("/dashboard", get(handlers::dashboard))
        .route("/view/:id", get(handlers::view_document))
        .route("/api/documents", get(api::list_documents))
        .route("/api/documents/:id", get(api::get_document))
        .route("/api/health", get(api::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves `app` on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
