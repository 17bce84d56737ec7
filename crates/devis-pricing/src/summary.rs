//! Quote summary
//!
//! Splits the monthly amount into what the client is bound to for the whole
//! commitment and what stays cancellable.

use devis_common::money::format_eur;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::CalculatorUpdate;
use crate::discount::DiscountEngine;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    /// Engaged months, 0 for comptant
    pub months: u32,
    /// Discounted hosting base in engaged mode
    pub engaged_monthly: Decimal,
    /// Monthly amount outside the engagement
    pub non_engaged_monthly: Decimal,
    /// One-time amount saved through discounts
    pub savings: Decimal,
    /// Grand total formatted for display
    pub grand_total_display: String,
}

impl QuoteSummary {
    pub fn from_update(update: &CalculatorUpdate, discounts: &DiscountEngine) -> Self {
        let totals = &update.totals;
        let rates = discounts.rates(update.commitment, update.is_partner);
        let engaged_monthly = discounts.engaged_monthly(&rates);
        let non_engaged_monthly = totals
            .monthly_total
            .checked_sub(engaged_monthly)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        let savings = totals
            .one_time_before_discount
            .checked_sub(totals.one_time_total)
            .unwrap_or(Decimal::ZERO);

        Self {
            months: update.commitment.months(),
            engaged_monthly,
            non_engaged_monthly,
            savings,
            grand_total_display: format_eur(totals.grand_total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{evaluate, CalculatorState};
    use crate::selection::Selection;
    use devis_common::{Channel, Commitment, Offer, OfferCatalog, OfferIndex, MAINTENANCE_HOSTING_ID};
    use rust_decimal_macros::dec;

    fn summary(state: CalculatorState) -> QuoteSummary {
        let index = OfferIndex::new(OfferCatalog::new(vec![Channel::new(
            "all",
            vec![
                Offer::new("site-vitrine", "Site", "").with_price_value(2000.0),
                Offer::new(MAINTENANCE_HOSTING_ID, "Hébergement", "")
                    .with_price_value(129.0)
                    .with_period("/mois"),
                Offer::new("maintenance-totale", "Totale", "")
                    .with_price_value(149.0)
                    .with_period("/mois"),
            ],
        )]));
        let engine = DiscountEngine::default();
        QuoteSummary::from_update(&evaluate(&index, &engine, &state), &engine)
    }

    #[test]
    fn test_engaged_split() {
        let s = summary(CalculatorState {
            selected_services: Selection::from_ids(["site-vitrine", "maintenance-totale"]),
            commitment: Commitment::Months24,
            is_partner: true,
        });
        assert_eq!(s.months, 24);
        assert_eq!(s.engaged_monthly, dec!(103.2));
        assert_eq!(s.non_engaged_monthly, dec!(119.2));
        assert_eq!(s.savings, dec!(560));
        assert_eq!(s.grand_total_display, "3 916,80 €");
    }

    #[test]
    fn test_comptant_leaves_everything_cancellable() {
        let s = summary(CalculatorState {
            selected_services: Selection::from_ids(["maintenance-totale"]),
            commitment: Commitment::Comptant,
            is_partner: false,
        });
        assert_eq!(s.months, 0);
        assert_eq!(s.engaged_monthly, dec!(0));
        assert_eq!(s.non_engaged_monthly, dec!(278));
        assert_eq!(s.savings, dec!(0));
    }
}
