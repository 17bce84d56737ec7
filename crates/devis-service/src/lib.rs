//! # Devis Service
//!
//! HTTP front for the pricing calculator. The surrounding quote workflow
//! posts calculator states and receives priced, stamped quotes.

pub mod config;
pub mod routes;

use anyhow::{Context, Result};
use devis_common::OfferCatalog;
use devis_pricing::PricingService;
use tracing::{info, warn};

use crate::config::ServiceConfig;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8085;

/// Load and validate the configured catalog, then build the pricing service
pub fn build_pricing(config: &ServiceConfig) -> Result<PricingService> {
    let catalog = match &config.catalog_path {
        Some(path) => {
            info!(path = %path, "Loading offer catalog");
            OfferCatalog::from_json_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path))?
        }
        None => {
            info!("Using embedded offer catalog");
            OfferCatalog::embedded().context("Embedded catalog is invalid")?
        }
    };

    let warnings = catalog.validate().context("Catalog failed validation")?;
    for warning in &warnings {
        warn!(%warning, "Catalog warning");
    }

    Ok(PricingService::new(catalog, config.pricing))
}
