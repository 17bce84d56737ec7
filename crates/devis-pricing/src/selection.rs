//! Selected offers
//!
//! Two rules hold after every operation:
//! - `maintenance-hosting` is always selected and cannot be removed
//! - at most one maintenance upgrade is selected; picking one evicts the other

use std::collections::BTreeSet;

use devis_common::{is_maintenance_upgrade, MAINTENANCE_HOSTING_ID};
use serde::{Deserialize, Serialize};

/// Set of selected offer ids
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    /// Selection holding only the mandatory hosting offer
    pub fn new() -> Self {
        let mut ids = BTreeSet::new();
        ids.insert(MAINTENANCE_HOSTING_ID.to_string());
        Self { ids }
    }

    /// Build from arbitrary ids, enforcing both rules.
    ///
    /// When both upgrades are listed the later one wins, as if they had been
    /// toggled in order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for id in ids {
            let id = id.into();
            if is_maintenance_upgrade(&id) {
                selection.ids.retain(|s| !is_maintenance_upgrade(s));
            }
            selection.ids.insert(id);
        }
        selection
    }

    /// Flip an offer in or out of the selection.
    ///
    /// Toggling the hosting offer does nothing. Unknown ids are accepted;
    /// they simply never contribute to totals.
    pub fn toggle(&mut self, offer_id: &str) {
        if offer_id != MAINTENANCE_HOSTING_ID && !self.ids.remove(offer_id) {
            if is_maintenance_upgrade(offer_id) {
                self.ids.retain(|id| !is_maintenance_upgrade(id));
            }
            self.ids.insert(offer_id.to_string());
        }
        self.ensure_hosting();
    }

    /// Copy of this selection with `offer_id` toggled
    pub fn toggled(&self, offer_id: &str) -> Self {
        let mut next = self.clone();
        next.toggle(offer_id);
        next
    }

    pub fn contains(&self, offer_id: &str) -> bool {
        self.ids.contains(offer_id)
    }

    /// Ids in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn ensure_hosting(&mut self) {
        if !self.ids.contains(MAINTENANCE_HOSTING_ID) {
            self.ids.insert(MAINTENANCE_HOSTING_ID.to_string());
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<String>> for Selection {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<Selection> for Vec<String> {
    fn from(selection: Selection) -> Self {
        selection.ids.into_iter().collect()
    }
}
