//! Inventory Item Entity
//!
//! A physical asset tracked per organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::history::HistoryEntry;

/// A cataloged asset with stock level, location and audit history
///
/// Field names serialize in camelCase so stored snapshots stay readable by
/// earlier builds of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier
    pub id: String,
    pub name: String,
    pub category: String,
    pub sku: String,
    /// Decoded barcode / QR value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Units on hand
    pub stock_count: u32,
    /// Low-stock threshold
    pub min_stock: u32,
    /// Free-text location (shelf, room, row)
    pub location: String,
    /// Unit price
    pub price: f64,
    pub last_updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Most recent audit entries, oldest first
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl InventoryItem {
    /// Low-stock / critical: at or below the threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock_count <= self.min_stock
    }

    /// Stock valuation (unit price times units on hand)
    pub fn valuation(&self) -> f64 {
        self.price * f64::from(self.stock_count)
    }
}

impl Entity for InventoryItem {
    fn id(&self) -> &str {
        &self.id
    }
}
