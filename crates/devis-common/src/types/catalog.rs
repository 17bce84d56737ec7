//! Offer catalog
//!
//! The catalog is a JSON object mapping a channel key to its offers:
//!
//! ```text
//! {
//!   "web":         { "label": "Site web", "offers": [ ... ] },
//!   "maintenance": { "offers": [ ... ] }
//! }
//! ```
//!
//! Channel order follows the document and drives the order of line items.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};
use crate::types::offer::Offer;
use crate::MAINTENANCE_HOSTING_ID;

/// Catalog shipped with the crate
const EMBEDDED_CATALOG: &str = include_str!("../../catalog/offers.json");

/// A group of offers sold through one channel
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub key: String,
    pub label: Option<String>,
    pub offers: Vec<Offer>,
}

impl Channel {
    pub fn new(key: impl Into<String>, offers: Vec<Offer>) -> Self {
        Self {
            key: key.into(),
            label: None,
            offers,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Deserialize)]
struct ChannelBody {
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    offers: Vec<Offer>,
}

#[derive(Serialize)]
struct ChannelBodyRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    offers: &'a [Offer],
}

/// Read-only collection of channels and their offers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferCatalog {
    channels: Vec<Channel>,
}

impl OfferCatalog {
    /// Build a catalog; each offer's `channel` is set to its channel key
    pub fn new(channels: Vec<Channel>) -> Self {
        let channels = channels
            .into_iter()
            .map(|mut channel| {
                for offer in &mut channel.offers {
                    offer.channel = channel.key.clone();
                }
                channel
            })
            .collect();
        Self { channels }
    }

    /// Parse a catalog from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CatalogError::Malformed(e.to_string()).into())
    }

    /// Load a catalog from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// The demo catalog bundled with the crate
    pub fn embedded() -> Result<Self> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// All offers in channel order
    pub fn offers(&self) -> impl Iterator<Item = &Offer> {
        self.channels.iter().flat_map(|c| c.offers.iter())
    }

    pub fn len(&self) -> usize {
        self.channels.iter().map(|c| c.offers.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check structural rules.
    ///
    /// Empty and duplicate ids are errors. A missing hosting offer is only
    /// reported as a warning: totals stay computable without it.
    pub fn validate(&self) -> std::result::Result<Vec<CatalogError>, CatalogError> {
        let mut seen = HashSet::new();
        for channel in &self.channels {
            for offer in &channel.offers {
                if offer.id.trim().is_empty() {
                    return Err(CatalogError::EmptyOfferId {
                        channel: channel.key.clone(),
                    });
                }
                if !seen.insert(offer.id.as_str()) {
                    return Err(CatalogError::DuplicateOffer {
                        id: offer.id.clone(),
                    });
                }
            }
        }

        let mut warnings = Vec::new();
        if !seen.contains(MAINTENANCE_HOSTING_ID) {
            warn!(id = MAINTENANCE_HOSTING_ID, "Catalog has no mandatory hosting offer");
            warnings.push(CatalogError::MissingMandatoryOffer {
                id: MAINTENANCE_HOSTING_ID.to_string(),
            });
        }
        Ok(warnings)
    }
}

impl Serialize for OfferCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.channels.len()))?;
        for channel in &self.channels {
            map.serialize_entry(
                &channel.key,
                &ChannelBodyRef {
                    label: channel.label.as_deref(),
                    offers: &channel.offers,
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OfferCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = OfferCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of channel key to { offers: [...] }")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<OfferCatalog, A::Error> {
                let mut channels = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, body)) = access.next_entry::<String, ChannelBody>()? {
                    channels.push(Channel {
                        key,
                        label: body.label,
                        offers: body.offers,
                    });
                }
                Ok(OfferCatalog::new(channels))
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Where an offer sits in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogPosition {
    pub channel: usize,
    pub offer: usize,
}

/// Catalog with an `id -> offer` index built once
#[derive(Debug, Clone, Default)]
pub struct OfferIndex {
    catalog: OfferCatalog,
    positions: HashMap<String, CatalogPosition>,
}

impl OfferIndex {
    /// Index a catalog; on duplicate ids the first listing wins
    pub fn new(catalog: OfferCatalog) -> Self {
        let mut positions = HashMap::with_capacity(catalog.len());
        for (ci, channel) in catalog.channels.iter().enumerate() {
            for (oi, offer) in channel.offers.iter().enumerate() {
                if positions.contains_key(&offer.id) {
                    debug!(offer = %offer.id, channel = %channel.key, "Duplicate offer id ignored");
                    continue;
                }
                positions.insert(
                    offer.id.clone(),
                    CatalogPosition {
                        channel: ci,
                        offer: oi,
                    },
                );
            }
        }
        Self { catalog, positions }
    }

    pub fn catalog(&self) -> &OfferCatalog {
        &self.catalog
    }

    pub fn position(&self, id: &str) -> Option<CatalogPosition> {
        self.positions.get(id).copied()
    }

    pub fn get(&self, id: &str) -> Option<&Offer> {
        let pos = self.position(id)?;
        self.catalog
            .channels
            .get(pos.channel)
            .and_then(|c| c.offers.get(pos.offer))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl From<OfferCatalog> for OfferIndex {
    fn from(catalog: OfferCatalog) -> Self {
        Self::new(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "web": { "label": "Site web", "offers": [
            { "id": "site-vitrine", "title": "Site vitrine", "priceValue": 2000 }
        ]},
        "maintenance": { "offers": [
            { "id": "maintenance-hosting", "title": "Hébergement", "priceValue": 129, "period": "/mois" }
        ]},
        "ads": { "offers": [] }
    }"#;

    #[test]
    fn test_channel_order_follows_document() {
        let catalog = OfferCatalog::from_json_str(SMALL).unwrap();
        let keys: Vec<&str> = catalog.channels().iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["web", "maintenance", "ads"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_offer_channel_comes_from_key() {
        let catalog = OfferCatalog::from_json_str(SMALL).unwrap();
        let hosting = catalog.offers().find(|o| o.id == "maintenance-hosting").unwrap();
        assert_eq!(hosting.channel, "maintenance");
    }

    #[test]
    fn test_json_roundtrip_keeps_order() {
        let catalog = OfferCatalog::from_json_str(SMALL).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        let again = OfferCatalog::from_json_str(&json).unwrap();
        assert_eq!(catalog, again);
    }

    #[test]
    fn test_malformed_catalog() {
        let err = OfferCatalog::from_json_str("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("Malformed"));
    }

    #[test]
    fn test_validate_duplicates_and_empty_ids() {
        let dup = OfferCatalog::new(vec![
            Channel::new("a", vec![Offer::new("x", "X", "")]),
            Channel::new("b", vec![Offer::new("x", "X again", "")]),
        ]);
        assert_eq!(
            dup.validate(),
            Err(CatalogError::DuplicateOffer { id: "x".to_string() })
        );

        let empty = OfferCatalog::new(vec![Channel::new("a", vec![Offer::new(" ", "Blank", "")])]);
        assert_eq!(
            empty.validate(),
            Err(CatalogError::EmptyOfferId { channel: "a".to_string() })
        );
    }

    #[test]
    fn test_validate_warns_without_hosting() {
        let catalog = OfferCatalog::new(vec![Channel::new("a", vec![Offer::new("x", "X", "")])]);
        let warnings = catalog.validate().unwrap();
        assert_eq!(warnings.len(), 1);

        let full = OfferCatalog::from_json_str(SMALL).unwrap();
        assert!(full.validate().unwrap().is_empty());
    }

    #[test]
    fn test_index_lookup() {
        let index = OfferIndex::new(OfferCatalog::from_json_str(SMALL).unwrap());
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("site-vitrine").unwrap().title, "Site vitrine");
        assert_eq!(
            index.position("maintenance-hosting"),
            Some(CatalogPosition { channel: 1, offer: 0 })
        );
        assert!(index.get("unknown").is_none());
    }

    #[test]
    fn test_index_first_listing_wins() {
        let index = OfferIndex::new(OfferCatalog::new(vec![
            Channel::new("a", vec![Offer::new("x", "First", "")]),
            Channel::new("b", vec![Offer::new("x", "Second", "")]),
        ]));
        assert_eq!(index.get("x").unwrap().title, "First");
        assert_eq!(index.get("x").unwrap().channel, "a");
    }

    #[test]
    fn test_embedded_catalog_is_valid() {
        let catalog = OfferCatalog::embedded().unwrap();
        assert!(!catalog.is_empty());
        assert!(catalog.validate().unwrap().is_empty());
    }
}
