//! Devis Service Binary

use std::net::SocketAddr;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use devis_service::{
    build_pricing,
    config::ServiceConfig,
    routes::{router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Devis service v{}", devis_common::VERSION);

    let config = ServiceConfig::load()?;
    info!("Loaded configuration: {:?}", config);

    let pricing = build_pricing(&config)?;
    info!(
        "Pricing policy: maintenance_base={}, partner_discount={}%",
        config.pricing.maintenance_base, config.pricing.partner_discount_pct
    );

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = router(AppState::new(pricing));

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Received shutdown signal");
    };

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Devis API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Shutting down Devis service");
    Ok(())
}
