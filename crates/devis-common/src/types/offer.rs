//! Catalog offers

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::money::{decimal_from_f64, parse_price_str};

/// Period label used when an offer has none
pub const ONE_TIME_PERIOD: &str = "one-time";

/// Period labels that mean "paid once"
pub const ONE_TIME_PERIODS: [&str; 2] = [ONE_TIME_PERIOD, "paiement unique"];

/// Period label of monthly offers
pub const MONTHLY_PERIOD: &str = "/mois";

/// How an offer is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Billing {
    /// Paid once (no period, `one-time` or `paiement unique`)
    OneTime,
    /// Any other period, billed every month
    Recurring,
}

/// A sellable offer from the static catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Unique id within the catalog
    pub id: String,
    /// Display title
    pub title: String,
    /// Numeric price, preferred over `price` when finite
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_value: Option<f64>,
    /// Display price, e.g. `"1 200,50€"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Billing period, e.g. `"/mois"`; absent means one-time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    /// Key of the channel that lists this offer
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub recommended: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Offer {
    /// Create an offer with no price and no period
    pub fn new(id: impl Into<String>, title: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price_value: None,
            price: None,
            period: None,
            channel: channel.into(),
            recommended: false,
            description: None,
            features: Vec::new(),
        }
    }

    /// Set the numeric price
    pub fn with_price_value(mut self, value: f64) -> Self {
        self.price_value = Some(value);
        self
    }

    /// Set the display price
    pub fn with_price(mut self, label: impl Into<String>) -> Self {
        self.price = Some(label.into());
        self
    }

    /// Set the billing period
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// Mark as recommended
    pub fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    /// Classify the offer as one-time or recurring
    pub fn billing(&self) -> Billing {
        match self.period.as_deref() {
            None => Billing::OneTime,
            Some(p) if ONE_TIME_PERIODS.contains(&p) => Billing::OneTime,
            Some(_) => Billing::Recurring,
        }
    }

    /// Period label for line items
    pub fn period_label(&self) -> &str {
        self.period.as_deref().unwrap_or(ONE_TIME_PERIOD)
    }

    /// Resolve the numeric unit price.
    ///
    /// `price_value` wins when finite; otherwise `price` is parsed; anything
    /// unreadable counts as zero.
    pub fn unit_price(&self) -> Decimal {
        if let Some(value) = self.price_value.and_then(decimal_from_f64) {
            return value;
        }

        match self.price.as_deref().and_then(parse_price_str) {
            Some(parsed) => {
                debug!(offer = %self.id, "Price resolved from display label");
                parsed
            }
            None => {
                debug!(offer = %self.id, "No readable price, counting as zero");
                Decimal::ZERO
            }
        }
    }
}
