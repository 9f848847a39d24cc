//! Augment Server - HTTP binding for the augmentation engine
//!
//! Exposes `/augmentation/{resize,crop,rotate,negative}` (GET and POST, JSON
//! body `{"image": "<base64>"}`) and `/health`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod types;

use std::sync::Arc;

use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub use config::ServerConfig;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Create the axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let max_body_bytes = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/augmentation/resize",
            get(handlers::resize).post(handlers::resize),
        )
        .route("/augmentation/crop", get(handlers::crop).post(handlers::crop))
        .route(
            "/augmentation/rotate",
            get(handlers::rotate).post(handlers::rotate),
        )
        .route(
            "/augmentation/negative",
            get(handlers::negative).post(handlers::negative),
        )
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn start_server(config: ServerConfig) -> Result<()> {
    let addr = config.bind_addr();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Augmentation server listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
