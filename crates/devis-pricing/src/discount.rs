//! Discount engine
//!
//! Engagement discount by commitment tier:
//!
//! | commitment | discount |
//! |------------|----------|
//! | comptant   | 0%       |
//! | 24 months  | 10%      |
//! | 36 months  | 20%      |
//! | 48 months  | 30%      |
//!
//! Partner discount is flat and compounds after the engagement discount.
//! Engagement never applies to recurring amounts.

use devis_common::money::{apply_discount, checked_product};
use devis_common::Commitment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PricingPolicy;

/// Engagement discount in percent for a commitment
pub fn engagement_discount_pct(commitment: Commitment) -> Decimal {
    match commitment {
        Commitment::Comptant => Decimal::ZERO,
        Commitment::Months24 => Decimal::TEN,
        Commitment::Months36 => Decimal::from(20),
        Commitment::Months48 => Decimal::from(30),
    }
}

/// Discounts in effect for one calculator state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRates {
    pub commitment: Commitment,
    pub engagement_pct: Decimal,
    pub partner_pct: Decimal,
}

impl DiscountRates {
    /// One-time amount: engagement (engaged mode only), then partner
    pub fn apply_one_time(&self, amount: Decimal) -> Decimal {
        let after_engagement = if self.commitment.is_engaged() {
            apply_discount(amount, self.engagement_pct)
        } else {
            amount
        };
        apply_discount(after_engagement, self.partner_pct)
    }

    /// Recurring amount: partner discount only
    pub fn apply_recurring(&self, amount: Decimal) -> Decimal {
        apply_discount(amount, self.partner_pct)
    }
}

/// Computes discount rates and the engaged grand total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountEngine {
    partner_pct: Decimal,
    maintenance_base: Decimal,
}

impl DiscountEngine {
    pub fn new(policy: &PricingPolicy) -> Self {
        Self {
            partner_pct: policy.partner_discount_pct,
            maintenance_base: policy.maintenance_base,
        }
    }

    pub fn rates(&self, commitment: Commitment, is_partner: bool) -> DiscountRates {
        DiscountRates {
            commitment,
            engagement_pct: engagement_discount_pct(commitment),
            partner_pct: if is_partner {
                self.partner_pct
            } else {
                Decimal::ZERO
            },
        }
    }

    /// Monthly amount the client is bound to: the discounted hosting base in
    /// engaged mode, nothing in comptant mode
    pub fn engaged_monthly(&self, rates: &DiscountRates) -> Decimal {
        if rates.commitment.is_engaged() {
            rates.apply_recurring(self.maintenance_base)
        } else {
            Decimal::ZERO
        }
    }

    /// Contractually engaged total.
    ///
    /// Engaged: discounted one-time plus the discounted hosting base for
    /// every engaged month. Upgrades and other monthly services stay out.
    /// Comptant: the discounted one-time amount alone.
    pub fn grand_total(&self, rates: &DiscountRates, one_time_discounted: Decimal) -> Decimal {
        let months = Decimal::from(rates.commitment.months());
        let engaged = checked_product(self.engaged_monthly(rates), months);
        one_time_discounted
            .checked_add(engaged)
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for DiscountEngine {
    fn default() -> Self {
        Self::new(&PricingPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_engagement_tiers() {
        let pcts: Vec<Decimal> = Commitment::ALL
            .iter()
            .map(|c| engagement_discount_pct(*c))
            .collect();
        assert_eq!(pcts, vec![dec!(0), dec!(10), dec!(20), dec!(30)]);
    }

    #[test]
    fn test_partner_flag() {
        let engine = DiscountEngine::default();
        assert_eq!(engine.rates(Commitment::Comptant, true).partner_pct, dec!(20));
        assert_eq!(engine.rates(Commitment::Comptant, false).partner_pct, dec!(0));
    }

    #[test]
    fn test_one_time_compounds_multiplicatively() {
        let rates = DiscountEngine::default().rates(Commitment::Months24, true);
        // 2000 * 0.9 * 0.8, not 2000 * (1 - 0.3)
        assert_eq!(rates.apply_one_time(dec!(2000)), dec!(1440));
    }

    #[test]
    fn test_comptant_skips_engagement() {
        let rates = DiscountEngine::default().rates(Commitment::Comptant, true);
        assert_eq!(rates.apply_one_time(dec!(2000)), dec!(1600));
    }

    #[test]
    fn test_recurring_ignores_engagement() {
        let rates = DiscountEngine::default().rates(Commitment::Months48, false);
        assert_eq!(rates.apply_recurring(dec!(129)), dec!(129));

        let partner = DiscountEngine::default().rates(Commitment::Months48, true);
        assert_eq!(partner.apply_recurring(dec!(129)), dec!(103.2));
    }

    #[test]
    fn test_grand_total_engaged() {
        let engine = DiscountEngine::default();
        let rates = engine.rates(Commitment::Months24, true);
        assert_eq!(engine.grand_total(&rates, dec!(1440)), dec!(3916.8));
    }

    #[test]
    fn test_grand_total_comptant() {
        let engine = DiscountEngine::default();
        let rates = engine.rates(Commitment::Comptant, false);
        assert_eq!(engine.grand_total(&rates, dec!(2000)), dec!(2000));
        assert_eq!(engine.engaged_monthly(&rates), dec!(0));
    }

    #[test]
    fn test_custom_policy() {
        let engine = DiscountEngine::new(&PricingPolicy {
            maintenance_base: dec!(100),
            partner_discount_pct: dec!(50),
        });
        let rates = engine.rates(Commitment::Months36, true);
        // 1000 * 0.8 * 0.5 + 100 * 0.5 * 36
        assert_eq!(engine.grand_total(&rates, rates.apply_one_time(dec!(1000))), dec!(2200));
    }
}
