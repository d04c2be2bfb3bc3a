use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use beaconview_server::{app::build_app, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Structured JSON logging. Level controlled via RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("beaconview=info".parse()?),
        )
        .json()
        .init();

    let cfg = beaconview_core::config::Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    let store = Arc::new(beaconview_engine::HttpStoreClient::new(
        &cfg.store_url,
        &cfg.store_token,
    ));
    let engine = beaconview_engine::AnalyticsEngine::new(store, &cfg.store_dataset);

    let port = cfg.port;
    let state = Arc::new(AppState::new(engine, cfg));
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "beaconview listening");
    axum::serve(listener, app).await?;
    Ok(())
}
