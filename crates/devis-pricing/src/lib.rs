//! # Devis Pricing
//!
//! Offer selection, commitment discounts and quote totals.
//!
//! ## Pricing Formula
//!
//! ```text
//! one_time = Σ one-time × (1 - e) × (1 - p)        e applies only when engaged
//! monthly  = Σ recurring × (1 - p)
//!
//! engaged:  grand = one_time + base × (1 - p) × months
//! comptant: grand = one_time
//! ```
//!
//! Where:
//! - e: engagement discount (0/10/20/30% for comptant/24/36/48 months)
//! - p: partner discount (20%)
//! - base: monthly hosting fee (129)
//!
//! Maintenance upgrades and other monthly services never enter the grand
//! total; they are shown apart as cancellable costs.

pub mod aggregator;
pub mod calculator;
pub mod discount;
pub mod quote;
pub mod selection;
pub mod summary;

use std::sync::Arc;

use devis_common::{OfferCatalog, OfferIndex, DEFAULT_MAINTENANCE_BASE, DEFAULT_PARTNER_DISCOUNT_PCT};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

pub use aggregator::TotalAggregator;
pub use calculator::{
    evaluate, reduce, CalculatorAction, CalculatorState, CalculatorUpdate, QuoteCalculator,
    UpdateListener,
};
pub use discount::{engagement_discount_pct, DiscountEngine, DiscountRates};
pub use quote::Quote;
pub use selection::Selection;
pub use summary::QuoteSummary;

/// Pricing constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Monthly hosting fee engaged for the whole commitment
    pub maintenance_base: Decimal,
    /// Partner discount in percent
    pub partner_discount_pct: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            maintenance_base: DEFAULT_MAINTENANCE_BASE,
            partner_discount_pct: DEFAULT_PARTNER_DISCOUNT_PCT,
        }
    }
}

/// Shared entry point: one indexed catalog, one policy
#[derive(Debug, Clone)]
pub struct PricingService {
    index: Arc<OfferIndex>,
    policy: PricingPolicy,
    discounts: DiscountEngine,
}

impl PricingService {
    pub fn new(catalog: OfferCatalog, policy: PricingPolicy) -> Self {
        let index = OfferIndex::new(catalog);
        info!(offers = index.len(), "Offer catalog indexed");
        Self {
            index: Arc::new(index),
            discounts: DiscountEngine::new(&policy),
            policy,
        }
    }

    pub fn catalog(&self) -> &OfferCatalog {
        self.index.catalog()
    }

    pub fn index(&self) -> &Arc<OfferIndex> {
        &self.index
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// A fresh calculator sharing this service's catalog
    pub fn calculator(&self) -> QuoteCalculator {
        QuoteCalculator::new(self.index.clone(), &self.policy)
    }

    /// Price a state
    pub fn evaluate(&self, state: &CalculatorState) -> CalculatorUpdate {
        evaluate(&self.index, &self.discounts, state)
    }

    /// Price a state and stamp it as a quote
    #[instrument(skip_all, fields(commitment = %state.commitment, is_partner = state.is_partner))]
    pub fn quote(&self, state: &CalculatorState) -> Quote {
        let update = self.evaluate(state);
        let summary = QuoteSummary::from_update(&update, &self.discounts);
        Quote::new(update, summary)
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new(OfferCatalog::default(), PricingPolicy::default())
    }
}
