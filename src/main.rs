//! TruthLens - backend core for a real-time misinformation-analysis dashboard.
//!
//! # API Endpoints
//!
//! - `GET /state` / `POST /dispatch` - The application state tree
//! - `GET /feed` - The filtered claim feed
//! - `GET /page/:id` - Rendered page views
//! - `GET /trending`, `POST /trending/refresh`, `POST /live/toggle` - Live rail
//! - `GET/POST /alerts`, `POST /alerts/:id/toggle`, `DELETE /alerts/:id`
//! - `POST /analyze` - Proxy to the external analysis agent
//! - `GET /health` - Health check

use std::env;
use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use truthlens::analysis::{AnalysisClient, DEFAULT_ANALYSIS_URL};
use truthlens::api::{AppContext, router};

/// Default port if not specified via environment variable.
const DEFAULT_PORT: u16 = 4400;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("truthlens=info".parse()?))
        .init();

    let port: u16 = env::var("TRUTHLENS_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let analysis_url = env::var("TRUTHLENS_ANALYSIS_URL")
        .unwrap_or_else(|_| DEFAULT_ANALYSIS_URL.to_string());

    info!(port, analysis_url = %analysis_url, "Starting TruthLens server");

    let ctx = AppContext::seeded(AnalysisClient::new(&analysis_url));
    ctx.live.start().await;
    info!("Live feed simulator started");

    let app = router(ctx);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "TruthLens is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
