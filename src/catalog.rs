//! Offer catalog
//! Read-only provider of travel offers, injected into the application state

use crate::{error::AppError, models::offer::Offer};
use std::collections::BTreeMap;
use std::path::Path;

/// Source of catalog offers
pub trait OfferCatalog: Send + Sync {
    /// All offers, ordered by id
    fn list(&self) -> Vec<Offer>;

    fn get(&self, id: i64) -> Option<Offer>;
}

/// In-memory catalog fixed at construction time
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    offers: BTreeMap<i64, Offer>,
}

impl StaticCatalog {
    pub fn new(offers: Vec<Offer>) -> Result<Self, AppError> {
        let mut map = BTreeMap::new();
        for offer in offers {
            let id = offer.id;
            if map.insert(id, offer).is_some() {
                return Err(AppError::Config(format!("Duplicate offer id in catalog: {}", id)));
            }
        }

        Ok(Self { offers: map })
    }

    /// The four destinations shipped with the portal
    pub fn builtin() -> Self {
        let offers = [
            (1, "Paris", "The city of love", "paris.jpg"),
            (2, "Tokyo", "Technology and tradition", "tokyo.jpg"),
            (3, "New York", "The city of opportunity", "newyork.jpg"),
            (4, "Rome", "History at every step", "rome.jpg"),
        ]
        .into_iter()
        .map(|(id, title, description, image)| {
            (
                id,
                Offer {
                    id,
                    title: title.to_string(),
                    description: description.to_string(),
                    image: image.to_string(),
                },
            )
        })
        .collect();

        Self { offers }
    }

    /// Load a JSON array of offers
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;

        let offers: Vec<Offer> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Failed to parse catalog {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), offers = offers.len(), "Catalog loaded");

        Self::new(offers)
    }
}

impl OfferCatalog for StaticCatalog {
    fn list(&self) -> Vec<Offer> {
        self.offers.values().cloned().collect()
    }

    fn get(&self, id: i64) -> Option<Offer> {
        self.offers.get(&id).cloned()
    }
}
