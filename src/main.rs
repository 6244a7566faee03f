//! Astronomy Feed Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the feed aggregator, routes, and metrics.

use anyhow::Context;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use astro_feed_aggregator::api::{self, AppState};
use astro_feed_aggregator::config::AppConfig;
use astro_feed_aggregator::feed::FeedAggregator;
use astro_feed_aggregator::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("astro_feed_aggregator=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AppConfig::load()?;
    let metrics = Metrics::init();

    let state = AppState::new(FeedAggregator::new(&cfg));
    let app = api::create_router(state).merge(metrics.router());

    let addr: SocketAddr = cfg
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address '{}'", cfg.bind_addr))?;
    info!(%addr, "serving astronomy feed");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
