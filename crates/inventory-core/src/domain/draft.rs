//! Item Draft
//!
//! The editable, partially filled form of an item. Drafts come from the
//! "add" button, from a vision result, or from an existing item.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::history::HistoryEntry;
use super::item::InventoryItem;

/// Editable fields of the item form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Category,
    Sku,
    Barcode,
    StockCount,
    MinStock,
    Location,
    Price,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemDraft {
    /// None until the draft has been saved once
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub sku: String,
    pub barcode: String,
    pub stock_count: u32,
    pub min_stock: u32,
    pub location: String,
    pub price: f64,
    pub image_url: Option<String>,
    /// Read-only view of the saved history
    pub history: Vec<HistoryEntry>,
}

impl ItemDraft {
    /// Empty form for manual registration
    pub fn blank() -> Self {
        Self { min_stock: 5, ..Default::default() }
    }

    pub fn from_item(item: &InventoryItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: item.name.clone(),
            category: item.category.clone(),
            sku: item.sku.clone(),
            barcode: item.barcode.clone().unwrap_or_default(),
            stock_count: item.stock_count,
            min_stock: item.min_stock,
            location: item.location.clone(),
            price: item.price,
            image_url: item.image_url.clone(),
            history: item.history.clone(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Current form value of a field, as shown in its input
    pub fn field(&self, field: DraftField) -> String {
        match field {
            DraftField::Name => self.name.clone(),
            DraftField::Category => self.category.clone(),
            DraftField::Sku => self.sku.clone(),
            DraftField::Barcode => self.barcode.clone(),
            DraftField::StockCount => self.stock_count.to_string(),
            DraftField::MinStock => self.min_stock.to_string(),
            DraftField::Location => self.location.clone(),
            DraftField::Price => self.price.to_string(),
        }
    }

    /// Apply raw input text to a field. Numbers that do not parse become 0;
    /// negative values clamp to 0.
    pub fn set_field(&mut self, field: DraftField, raw: &str) {
        match field {
            DraftField::Name => self.name = raw.to_string(),
            DraftField::Category => self.category = raw.to_string(),
            DraftField::Sku => self.sku = raw.to_string(),
            DraftField::Barcode => self.barcode = raw.to_string(),
            DraftField::StockCount => self.stock_count = parse_count(raw),
            DraftField::MinStock => self.min_stock = parse_count(raw),
            DraftField::Location => self.location = raw.to_string(),
            DraftField::Price => {
                self.price = raw.trim().parse::<f64>().ok().filter(|p| p.is_finite()).unwrap_or(0.0).max(0.0)
            }
        }
    }

    /// Finalize into an item, filling blanks with defaults.
    ///
    /// History is carried along for display only; reconciliation decides
    /// what is actually stored.
    pub fn into_item(self, now: DateTime<Utc>) -> InventoryItem {
        let barcode = Some(self.barcode.trim().to_string()).filter(|b| !b.is_empty());
        InventoryItem {
            id: self.id.unwrap_or_else(generate_asset_id),
            name: or_default(self.name, "New Asset"),
            category: or_default(self.category, "General"),
            sku: or_default(self.sku, "N/A"),
            barcode,
            stock_count: self.stock_count,
            min_stock: self.min_stock,
            location: or_default(self.location, "Warehouse"),
            price: self.price,
            last_updated: now,
            image_url: self.image_url,
            history: self.history,
        }
    }
}

fn or_default(value: String, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_count(raw: &str) -> u32 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.max(0.0).min(f64::from(u32::MAX)) as u32)
        .unwrap_or(0)
}

/// Fresh id for a newly registered asset
pub fn generate_asset_id() -> String {
    format!("asset_{}", Uuid::new_v4().simple())
}

/// Placeholder SKU: `SKU-` followed by five random upper-case characters
pub fn generate_sku() -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(5).collect();
    format!("SKU-{}", suffix.to_uppercase())
}
