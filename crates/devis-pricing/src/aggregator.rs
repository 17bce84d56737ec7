//! Total aggregation
//!
//! Walks the selection, classifies each offer as one-time or recurring,
//! buckets recurring offers into maintenance and other, then applies the
//! discount engine. Unknown ids are skipped and unreadable prices count as
//! zero, so aggregation always produces a result.

use devis_common::money::checked_sum;
use devis_common::{
    is_maintenance, Billing, CatalogPosition, Commitment, LineItem, Offer, OfferIndex,
    TotalsResult,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace};

use crate::discount::DiscountEngine;
use crate::selection::Selection;

/// Raw sums before discounts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Subtotals {
    one_time: Vec<Decimal>,
    maintenance: Vec<Decimal>,
    other_monthly: Vec<Decimal>,
}

/// Turns a selection into a [`TotalsResult`]
#[derive(Debug, Clone, Copy)]
pub struct TotalAggregator<'a> {
    index: &'a OfferIndex,
    discounts: &'a DiscountEngine,
}

impl<'a> TotalAggregator<'a> {
    pub fn new(index: &'a OfferIndex, discounts: &'a DiscountEngine) -> Self {
        Self { index, discounts }
    }

    /// Selected offers in line item order: catalog channel order first,
    /// selection order within a channel
    fn resolve(&self, selection: &Selection) -> Vec<&'a Offer> {
        let mut resolved: Vec<(CatalogPosition, &'a Offer)> = selection
            .iter()
            .filter_map(|id| {
                let found = self.index.position(id).zip(self.index.get(id));
                if found.is_none() {
                    debug!(offer = id, "Selected offer not in catalog, skipped");
                }
                found
            })
            .collect();
        resolved.sort_by_key(|(pos, _)| pos.channel);
        resolved.into_iter().map(|(_, offer)| offer).collect()
    }

    #[instrument(skip_all, fields(selected = selection.len(), commitment = %commitment, is_partner))]
    pub fn aggregate(
        &self,
        selection: &Selection,
        commitment: Commitment,
        is_partner: bool,
    ) -> TotalsResult {
        let mut subtotals = Subtotals::default();
        let mut services = Vec::with_capacity(selection.len());

        for offer in self.resolve(selection) {
            let price = offer.unit_price();
            trace!(offer = %offer.id, %price, billing = ?offer.billing(), "Offer priced");

            match offer.billing() {
                Billing::OneTime => subtotals.one_time.push(price),
                Billing::Recurring if is_maintenance(&offer.id) => {
                    subtotals.maintenance.push(price)
                }
                Billing::Recurring => subtotals.other_monthly.push(price),
            }
            services.push(LineItem::from_offer(offer, price));
        }

        let one_time_before_discount = checked_sum(subtotals.one_time);
        let maintenance = checked_sum(subtotals.maintenance);
        let other_monthly = checked_sum(subtotals.other_monthly);
        let monthly = maintenance.checked_add(other_monthly).unwrap_or(Decimal::ZERO);

        let rates = self.discounts.rates(commitment, is_partner);
        let one_time_total = rates.apply_one_time(one_time_before_discount);
        let grand_total = self.discounts.grand_total(&rates, one_time_total);

        TotalsResult {
            one_time_total,
            monthly_total: rates.apply_recurring(monthly),
            maintenance_total: rates.apply_recurring(maintenance),
            other_monthly_total: rates.apply_recurring(other_monthly),
            one_time_before_discount,
            engagement_discount: rates.engagement_pct,
            partner_discount: rates.partner_pct,
            grand_total,
            services,
        }
    }
}
