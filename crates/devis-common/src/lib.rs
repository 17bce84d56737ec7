//! # Devis Common
//!
//! Shared types and errors for the Devis pricing calculator.
//!
//! ## Core Types
//!
//! - [`Offer`]: a sellable item from the static catalog
//! - [`OfferCatalog`]/[`OfferIndex`]: channels of offers, indexed by id
//! - [`Commitment`]: comptant, 24, 36 or 48 months
//! - [`TotalsResult`]/[`LineItem`]: the calculator output
//!
//! ## Money
//!
//! - [`money`]: tolerant price parsing, overflow-safe arithmetic and
//!   French currency formatting

pub mod error;
pub mod money;
pub mod types;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// Re-export commonly used types at crate root
pub use error::{CatalogError, DevisError, InputError, Result};
pub use types::{
    catalog::{CatalogPosition, Channel, OfferCatalog, OfferIndex},
    commitment::Commitment,
    offer::{Billing, Offer, MONTHLY_PERIOD, ONE_TIME_PERIOD, ONE_TIME_PERIODS},
    totals::{LineItem, TotalsResult},
};

/// Devis version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base hosting offer, always selected
pub const MAINTENANCE_HOSTING_ID: &str = "maintenance-hosting";

/// Maintenance upgrades; at most one may be selected
pub const MAINTENANCE_UPGRADE_IDS: [&str; 2] = ["maintenance-accompagnement", "maintenance-totale"];

/// Offers counted in the maintenance bucket
pub const MAINTENANCE_IDS: [&str; 3] = [
    MAINTENANCE_HOSTING_ID,
    "maintenance-accompagnement",
    "maintenance-totale",
];

/// Monthly hosting fee engaged for the whole commitment
pub const DEFAULT_MAINTENANCE_BASE: Decimal = dec!(129);

/// Partner discount in percent
pub const DEFAULT_PARTNER_DISCOUNT_PCT: Decimal = dec!(20);

/// Whether an id is one of the maintenance upgrades
pub fn is_maintenance_upgrade(id: &str) -> bool {
    MAINTENANCE_UPGRADE_IDS.contains(&id)
}

/// Whether an id belongs to the maintenance bucket
pub fn is_maintenance(id: &str) -> bool {
    MAINTENANCE_IDS.contains(&id)
}
