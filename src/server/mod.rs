//! HTTP surface over the ledger and the aggregation engine.

mod error;
mod handlers;

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, put},
    Router,
};
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::service::Ledger;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) ledger: Arc<Mutex<Ledger>>,
}

impl AppState {
    pub(crate) fn new(ledger: Ledger) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}

pub(crate) fn router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route(
            "/transactions/:id",
            put(handlers::update_transaction).delete(handlers::delete_transaction),
        )
        .route(
            "/budgets",
            get(handlers::list_budgets)
                .post(handlers::create_budget)
                .put(handlers::update_budget),
        )
        .route("/budgets/:id", delete(handlers::delete_budget))
        .route("/analytics/dashboard", get(handlers::dashboard))
        .route("/analytics/categories", get(handlers::categories))
        .route("/analytics/monthly", get(handlers::monthly))
        .route("/analytics/budget-comparison", get(handlers::comparison))
        .route("/analytics/insights", get(handlers::insights))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Serve until Ctrl-C or SIGTERM. The ledger, and with it the database
/// handle, is dropped when this returns.
pub(crate) async fn serve(ledger: Ledger, config: &ServerConfig) -> Result<()> {
    let app = router(AppState::new(ledger), config.cors);
    let addr = config.socket_addr();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, cors = config.cors, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
