//! Calculator state, reducer and change notification
//!
//! State changes go through [`reduce`], a pure `(state, action) -> state`
//! function. [`QuoteCalculator`] owns one state, applies actions with it and
//! recomputes totals eagerly after every effective change, handing the
//! result to its listeners. Nothing is cached between changes.

use std::sync::Arc;

use devis_common::{Commitment, LineItem, OfferIndex, TotalsResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::TotalAggregator;
use crate::discount::DiscountEngine;
use crate::selection::Selection;
use crate::PricingPolicy;

/// Inputs of the calculator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    #[serde(default)]
    pub selected_services: Selection,
    #[serde(default)]
    pub commitment: Commitment,
    #[serde(default)]
    pub is_partner: bool,
}

/// User interactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalculatorAction {
    Toggle(String),
    SetCommitment(Commitment),
    SetPartner(bool),
    /// Back to hosting only, comptant, not partner
    Reset,
}

/// Apply one action to a state
pub fn reduce(state: &CalculatorState, action: CalculatorAction) -> CalculatorState {
    match action {
        CalculatorAction::Toggle(offer_id) => CalculatorState {
            selected_services: state.selected_services.toggled(&offer_id),
            ..state.clone()
        },
        CalculatorAction::SetCommitment(commitment) => CalculatorState {
            commitment,
            ..state.clone()
        },
        CalculatorAction::SetPartner(is_partner) => CalculatorState {
            is_partner,
            ..state.clone()
        },
        CalculatorAction::Reset => CalculatorState::default(),
    }
}

/// Payload handed to listeners after each change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorUpdate {
    pub selected_services: Selection,
    pub commitment: Commitment,
    pub is_partner: bool,
    pub totals: TotalsResult,
    pub services: Vec<LineItem>,
}

impl CalculatorUpdate {
    fn new(state: &CalculatorState, totals: TotalsResult) -> Self {
        Self {
            selected_services: state.selected_services.clone(),
            commitment: state.commitment,
            is_partner: state.is_partner,
            services: totals.services.clone(),
            totals,
        }
    }
}

/// Receives calculator updates
pub trait UpdateListener: Send + Sync {
    fn on_update(&self, update: &CalculatorUpdate);
}

impl<F> UpdateListener for F
where
    F: Fn(&CalculatorUpdate) + Send + Sync,
{
    fn on_update(&self, update: &CalculatorUpdate) {
        self(update)
    }
}

/// Compute the update for a state without holding one
pub fn evaluate(
    index: &OfferIndex,
    discounts: &DiscountEngine,
    state: &CalculatorState,
) -> CalculatorUpdate {
    let totals = TotalAggregator::new(index, discounts).aggregate(
        &state.selected_services,
        state.commitment,
        state.is_partner,
    );
    CalculatorUpdate::new(state, totals)
}

/// Stateful calculator for one quote being edited
pub struct QuoteCalculator {
    index: Arc<OfferIndex>,
    discounts: DiscountEngine,
    state: CalculatorState,
    listeners: Vec<Box<dyn UpdateListener>>,
}

impl QuoteCalculator {
    pub fn new(index: Arc<OfferIndex>, policy: &PricingPolicy) -> Self {
        Self {
            index,
            discounts: DiscountEngine::new(policy),
            state: CalculatorState::default(),
            listeners: Vec::new(),
        }
    }

    /// Start from an existing state
    pub fn with_state(mut self, state: CalculatorState) -> Self {
        self.state = state;
        self
    }

    pub fn subscribe(&mut self, listener: impl UpdateListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// Current inputs and totals
    pub fn snapshot(&self) -> CalculatorUpdate {
        evaluate(&self.index, &self.discounts, &self.state)
    }

    pub fn totals(&self) -> TotalsResult {
        self.snapshot().totals
    }

    /// Apply an action. Listeners are notified only when the state changed;
    /// returns whether it did.
    pub fn dispatch(&mut self, action: CalculatorAction) -> bool {
        debug!(?action, "Calculator action");
        let next = reduce(&self.state, action);
        if next == self.state {
            return false;
        }
        self.state = next;

        let update = self.snapshot();
        for listener in &self.listeners {
            listener.on_update(&update);
        }
        true
    }

    pub fn toggle(&mut self, offer_id: impl Into<String>) -> bool {
        self.dispatch(CalculatorAction::Toggle(offer_id.into()))
    }

    pub fn set_commitment(&mut self, commitment: Commitment) -> bool {
        self.dispatch(CalculatorAction::SetCommitment(commitment))
    }

    pub fn set_partner(&mut self, is_partner: bool) -> bool {
        self.dispatch(CalculatorAction::SetPartner(is_partner))
    }

    pub fn reset(&mut self) -> bool {
        self.dispatch(CalculatorAction::Reset)
    }
}
