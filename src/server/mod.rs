//! HTTP surface: `GET /convert` over a shared, immutable rate table.

mod error;
mod handlers;

pub use error::ApiError;

use crate::core::RateTable;
use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

mod urls {
    pub const CONVERT: &str = "/convert";
}

#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RateTable>,
}

pub fn router(rates: Arc<RateTable>) -> Router {
    Router::new()
        .route(
            urls::CONVERT,
            get(handlers::convert)
                .head(handlers::not_found)
                .fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .with_state(AppState { rates })
}

/// Serves on an already bound listener until Ctrl-C.
pub async fn serve(listener: TcpListener, rates: Arc<RateTable>) -> Result<()> {
    let addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!(%addr, currencies = rates.len(), "Starting web server");

    axum::serve(listener, router(rates))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")?;

    info!("Web server has been closed");
    Ok(())
}

pub async fn bind_and_serve(bind_address: &str, rates: Arc<RateTable>) -> Result<()> {
    let listener = TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    serve(listener, rates).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
