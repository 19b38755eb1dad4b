//! HTTP server assembly
//!
//! The server is a single-user tool: every client shares one
//! [`AssessmentService`] and therefore one session. A request from any client
//! supersedes requests still in flight from the others, and the current report
//! belongs to whoever asked last.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

use crate::api::{self, AppState};
use crate::assessment::AssessmentService;
use crate::config::WindSiteConfig;
use crate::source::OpenMeteoSource;

/// Build the full application: JSON API under `/api`, static frontend elsewhere
pub fn app(state: AppState, static_dir: &str, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(static_dir))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
}

pub async fn run(config: &WindSiteConfig, port: u16) -> Result<()> {
    let source = OpenMeteoSource::new(&config.source)?;
    let state = AppState {
        service: Arc::new(AssessmentService::new(Arc::new(source))),
        examples: Arc::new(config.examples.clone()),
    };

    // leave room for the upstream fetch to time out on its own first
    let request_timeout = Duration::from_secs(u64::from(config.source.timeout_seconds) + 5);
    let app = app(state, &config.server.static_dir, request_timeout);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await.context("Web server failed")?;
    Ok(())
}
