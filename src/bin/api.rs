//! HackTrack API Server
//!
//! Run with: cargo run --bin hacktrack-api
//!
//! # Configuration
//!
//! Read from the standard config locations (see `hacktrack config`), then
//! overridden by environment variables:
//! - `HACKTRACK_API_HOST`: Host to bind to (default: 127.0.0.1)
//! - `HACKTRACK_API_PORT`: Port to listen on (default: 8080)
//! - `HACKTRACK_DATA_DIR`: Data directory
//! - `HACKTRACK_LOG_FORMAT`: `pretty` or `json`
//! - `RUST_LOG`: Log filter (default: hacktrack=info)

use anyhow::{Context, Result};
use hacktrack::api::{serve, AppState};
use hacktrack::auth::{AuthState, SessionStore};
use hacktrack::config::Config;
use hacktrack::hackathon::HackathonRegistry;
use hacktrack::notify::TracingNotifier;
use hacktrack::review::mock_teams;
use hacktrack::storage::FileStore;
use hacktrack::timing::{SystemClock, TokioDelay};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting HackTrack API server v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = config.storage.data_path();
    tracing::info!("Data directory: {:?}", data_dir);
    let storage = Arc::new(
        FileStore::open(&data_dir)
            .with_context(|| format!("opening data directory {}", data_dir.display()))?,
    );

    let session = SessionStore::new(
        storage.clone(),
        Arc::new(TokioDelay),
        config.latency.to_latency(),
    )
    .with_notifier(Arc::new(TracingNotifier));
    match session.restore() {
        AuthState::Authenticated(s) => tracing::info!(user_id = %s.id, "Restored session"),
        _ => tracing::info!("No stored session"),
    }

    let registry = HackathonRegistry::initialize(storage, Arc::new(SystemClock))
        .context("stored hackathon data is unreadable; run `hacktrack reset` to start over")?;
    tracing::info!("Loaded {} hackathon(s)", registry.hackathons().len());

    let state = AppState::new(
        Arc::new(session),
        Arc::new(registry),
        mock_teams(),
        config.api.clone(),
    );

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("HackTrack API server stopped");
    Ok(())
}
