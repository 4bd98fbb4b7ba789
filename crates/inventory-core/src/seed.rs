//! Seed Dataset
//!
//! Loaded whenever an organization has no usable stored inventory.

use chrono::{DateTime, Utc};

use crate::domain::InventoryItem;

struct SeedRow {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    sku: &'static str,
    barcode: &'static str,
    stock: u32,
    min: u32,
    location: &'static str,
    price: f64,
}

const SEED: &[SeedRow] = &[
    SeedRow {
        id: "1",
        name: "Wireless Ergonomic Mouse",
        category: "Peripherals",
        sku: "MS-ERG-001",
        barcode: "123456789012",
        stock: 45,
        min: 10,
        location: "Shelf A3",
        price: 59.99,
    },
    SeedRow {
        id: "2",
        name: "Mechanical Keyboard (Blue Switch)",
        category: "Peripherals",
        sku: "KB-MEC-002",
        barcode: "223456789012",
        stock: 12,
        min: 5,
        location: "Shelf B1",
        price: 129.50,
    },
    SeedRow {
        id: "3",
        name: "4K OLED Monitor 27\"",
        category: "Displays",
        sku: "MN-4KO-003",
        barcode: "323456789012",
        stock: 3,
        min: 5,
        location: "Back Room - Row 4",
        price: 799.00,
    },
    SeedRow {
        id: "4",
        name: "USB-C Hub Multiport",
        category: "Accessories",
        sku: "AC-HUB-004",
        barcode: "423456789012",
        stock: 89,
        min: 20,
        location: "Shelf A1",
        price: 45.00,
    },
];

/// The four demo assets, stamped with `now`
pub fn seed_inventory(now: DateTime<Utc>) -> Vec<InventoryItem> {
    SEED.iter()
        .map(|row| InventoryItem {
            id: row.id.to_string(),
            name: row.name.to_string(),
            category: row.category.to_string(),
            sku: row.sku.to_string(),
            barcode: Some(row.barcode.to_string()),
            stock_count: row.stock,
            min_stock: row.min,
            location: row.location.to_string(),
            price: row.price,
            last_updated: now,
            image_url: None,
            history: Vec::new(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_reproducible() {
        let now = Utc::now();
        let a = seed_inventory(now);
        let b = seed_inventory(now);
        assert_eq!(a, b);
        let ids: Vec<_> = a.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }
}
