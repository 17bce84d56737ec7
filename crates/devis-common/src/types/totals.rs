//! Calculator output

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::offer::Offer;

/// One selected offer as shown on the quote
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    /// Unit price before any discount
    pub price: Decimal,
    pub period: String,
    pub channel: String,
}

impl LineItem {
    pub fn from_offer(offer: &Offer, price: Decimal) -> Self {
        Self {
            id: offer.id.clone(),
            name: offer.title.clone(),
            price,
            period: offer.period_label().to_string(),
            channel: offer.channel.clone(),
        }
    }
}

/// Price breakdown for one calculator state.
///
/// Derived on every change and never stored. All amounts are after the
/// discounts that apply to them, except `one_time_before_discount` and the
/// line item prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResult {
    /// One-time amount after engagement (engaged only) and partner discounts
    pub one_time_total: Decimal,
    /// All recurring amounts after partner discount
    pub monthly_total: Decimal,
    /// Recurring hosting and maintenance upgrades after partner discount
    pub maintenance_total: Decimal,
    /// Other recurring services after partner discount
    pub other_monthly_total: Decimal,
    pub one_time_before_discount: Decimal,
    /// Engagement discount in percent
    pub engagement_discount: Decimal,
    /// Partner discount in percent
    pub partner_discount: Decimal,
    /// Contractually engaged total
    pub grand_total: Decimal,
    pub services: Vec<LineItem>,
}
