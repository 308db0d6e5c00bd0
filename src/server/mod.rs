//! HTTP API
//!
//! - `GET  /api/health` liveness probe
//! - `POST /api/plan`   plan a question (lenient JSON body)
//!
//! Unknown routes answer 404 with a JSON error body.

mod error;
mod routes;

pub use error::ApiError;
pub use routes::router;

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::config::Config;
use crate::plan::{PlanSource, Planner, ProviderKind};
use crate::types::Result;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<dyn PlanSource>,
    /// Used when a request names no provider
    pub default_provider: ProviderKind,
}

impl AppState {
    pub fn new(planner: Arc<dyn PlanSource>, default_provider: ProviderKind) -> Self {
        Self {
            planner,
            default_provider,
        }
    }
}

/// Bind and serve the API until Ctrl+C
pub async fn serve(config: &Config) -> Result<()> {
    let planner = Planner::from_config(config)?;
    if planner.configured().is_empty() {
        warn!("No provider is fully configured; /api/plan will report the missing settings");
    }

    let state = AppState::new(Arc::new(planner), config.llm.default_provider);
    let app = router(state, config.server.body_limit_bytes);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(addr.as_str()).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", err);
        return;
    }
    info!("Ctrl+C received, shutting down");
}
