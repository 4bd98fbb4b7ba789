//! Inventory Repository
//!
//! One key per organization holding the serialized item array.

use chrono::{DateTime, Utc};

use super::traits::KeyValueStore;
use crate::domain::InventoryItem;
use crate::error::{AppError, AppResult};
use crate::seed::seed_inventory;

/// Where the loaded inventory came from
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    Stored,
    /// Nothing (or an empty list) was stored
    Seeded,
    /// The stored snapshot was unreadable; the seed replaced it
    Recovered(AppError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub items: Vec<InventoryItem>,
    pub source: LoadSource,
}

pub struct InventoryRepository<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> InventoryRepository<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self { store, prefix: prefix.into() }
    }

    /// Storage key of an organization partition
    pub fn key(&self, org_id: &str) -> String {
        format!("{}{}", self.prefix, org_id)
    }

    /// `Ok(None)` when the organization has nothing stored;
    /// `Err(StorageCorruption)` when the snapshot does not parse.
    pub fn load(&self, org_id: &str) -> AppResult<Option<Vec<InventoryItem>>> {
        match self.store.get(&self.key(org_id))? {
            Some(raw) => {
                let items = serde_json::from_str::<Vec<InventoryItem>>(&raw)?;
                Ok(Some(items))
            }
            None => Ok(None),
        }
    }

    pub fn save(&self, org_id: &str, items: &[InventoryItem]) -> AppResult<()> {
        let raw = serde_json::to_string(items).map_err(|e| AppError::Storage(e.to_string()))?;
        self.store.set(&self.key(org_id), &raw)?;
        log::debug!("saved {} items for org {}", items.len(), org_id);
        Ok(())
    }

    /// Load, falling back to the seed dataset when nothing usable is stored
    pub fn load_or_seed(&self, org_id: &str, now: DateTime<Utc>) -> LoadOutcome {
        match self.load(org_id) {
            Ok(Some(items)) if !items.is_empty() => {
                log::info!("loaded {} items for org {}", items.len(), org_id);
                LoadOutcome { items, source: LoadSource::Stored }
            }
            Ok(_) => {
                log::info!("no stored inventory for org {}, using seed", org_id);
                LoadOutcome { items: seed_inventory(now), source: LoadSource::Seeded }
            }
            Err(e) => {
                log::warn!("inventory for org {} unreadable ({}), using seed", org_id, e);
                LoadOutcome { items: seed_inventory(now), source: LoadSource::Recovered(e) }
            }
        }
    }
}
