//! Devis service configuration

use anyhow::Result;
use devis_pricing::PricingPolicy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Devis service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Catalog JSON file; the embedded demo catalog when unset
    pub catalog_path: Option<String>,
    /// Pricing constants
    pub pricing: PricingPolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
            catalog_path: None,
            pricing: PricingPolicy::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment and `.env`
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    /// Build from any key lookup; unparsable values keep the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        // Platform PORT first, DEVIS_PORT wins over it
        if let Some(p) = lookup("PORT").and_then(|v| v.parse::<u16>().ok()) {
            cfg.port = p;
        }
        if let Some(p) = lookup("DEVIS_PORT").and_then(|v| v.parse::<u16>().ok()) {
            cfg.port = p;
        }
        if let Some(host) = lookup("DEVIS_HOST") {
            cfg.host = host;
        }
        if let Some(path) = lookup("DEVIS_CATALOG_PATH").filter(|p| !p.trim().is_empty()) {
            cfg.catalog_path = Some(path);
        }

        // Pricing settings
        if let Some(v) = lookup("DEVIS_MAINTENANCE_BASE").and_then(|v| v.trim().parse::<Decimal>().ok()) {
            cfg.pricing.maintenance_base = v;
        }
        if let Some(v) = lookup("DEVIS_PARTNER_DISCOUNT_PCT")
            .and_then(|v| v.trim().parse::<Decimal>().ok())
            .filter(|v| *v >= Decimal::ZERO && *v <= Decimal::ONE_HUNDRED)
        {
            cfg.pricing.partner_discount_pct = v;
        }

        cfg
    }
}
