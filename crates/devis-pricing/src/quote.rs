//! Quote envelope handed to the contract workflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculator::CalculatorUpdate;
use crate::summary::QuoteSummary;

/// A priced calculator state, stamped for forwarding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: Uuid,
    pub computed_at: DateTime<Utc>,
    pub update: CalculatorUpdate,
    pub summary: QuoteSummary,
}

impl Quote {
    pub fn new(update: CalculatorUpdate, summary: QuoteSummary) -> Self {
        Self {
            quote_id: Uuid::now_v7(),
            computed_at: Utc::now(),
            update,
            summary,
        }
    }
}
