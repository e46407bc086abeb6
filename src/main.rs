//! POI Playground - map annotation and backend connectivity demo
//!
//! This is the composition root that wires together all the components.

use poi_playground::adapters::inbound::{ApiServer, ApiState};
use poi_playground::adapters::outbound::{InMemoryPoiRepository, PostgrestClient};
use poi_playground::application::{ConnectivityProber, PoiService};
use poi_playground::config::load_config;
use poi_playground::domain::services::ErrorClassifier;
use poi_playground::infrastructure::{shutdown_signal, ShutdownController};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let cfg = load_config()?;

    // Setup logging
    let log_level = if cfg.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!(
        "starting poi-playground listen={} backend={}",
        cfg.listen_addr,
        cfg.backend_url
    );

    // ===== COMPOSITION ROOT =====

    // 1. Outbound adapters
    let poi_repo = Arc::new(InMemoryPoiRepository::new());
    let backend = Arc::new(PostgrestClient::new(
        cfg.backend_url.clone(),
        cfg.backend_key.clone(),
        Duration::from_secs(cfg.probe_timeout_secs),
    )?);

    // 2. Application services
    let pois = Arc::new(PoiService::new(poi_repo, cfg.viewport(), cfg.jitter_radius));
    if cfg.seed_on_start {
        pois.seed_samples().await?;
        tracing::info!("seeded sample POIs");
    }

    let prober = Arc::new(ConnectivityProber::new(
        backend,
        ErrorClassifier::new(cfg.pattern_table()?),
        cfg.probe_resource.clone(),
    ));

    // 3. Inbound adapter
    let shutdown = ShutdownController::new();
    tokio::spawn(shutdown_signal(shutdown.clone()));

    let server = ApiServer::new(cfg.listen_addr.clone(), ApiState::new(pois, prober));
    server.run(shutdown.wait()).await?;

    tracing::info!("poi-playground stopped");
    Ok(())
}
