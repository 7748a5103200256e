//! HTTP service.
//!
//! Exposes place autocomplete and details with the provider's JSON shape,
//! plus business analysis and connect links. Provider calls are blocking
//! and run on tokio's blocking pool.

mod error;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::{
    create_router, AppState, AutocompleteResponse, DetailsResponse, HealthResponse,
};

use axum::Router;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::{GbpError, Result};

/// Router with state and middleware applied
pub fn build_app(config: &ServerConfig, state: AppState) -> Router {
    let app = create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());
    if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind and serve until Ctrl+C (or SIGTERM on unix).
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr = config.address();
    let app = build_app(config, state);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!("Failed to bind to {addr}: {e}");
        GbpError::io(&addr, e)
    })?;

    info!("Server listening on: http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GbpError::io(&addr, e))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received shutdown signal");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix;
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
                info!("Received TERM signal");
            }
            Err(e) => {
                error!("Failed to install TERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
