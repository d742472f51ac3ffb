//! HTTP boundary for the ingestion service.
//!
//! Thin, mechanical layer: one route, request tracing, graceful shutdown.
//! All write-then-publish semantics live in the domain service.

use axum::{routing::post, Router};
use forecast_domain::ObservationIngestionService;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::observation_handler::create_observation;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: Arc<ObservationIngestionService>,
}

/// Create the Axum router with all handlers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/weatherforecast", post(create_observation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until SIGINT/SIGTERM.
pub async fn serve(addr: &str, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "HTTP server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received ctrl-c, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
