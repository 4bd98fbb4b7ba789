//! Catalog Matching
//!
//! Turns a vision result into either an existing catalog entry or a new
//! draft ready for registration.

use crate::domain::{generate_sku, InventoryItem, ItemAnalysis, ItemDraft};

/// Max entries in the scanner's cross-reference panel
pub const SIMILAR_LIMIT: usize = 3;

/// Outcome of matching a recognition result against the catalog
#[derive(Debug, Clone, PartialEq)]
pub enum Recognition {
    /// Already cataloged; open it for editing
    Existing(InventoryItem),
    /// Unknown; register it from this draft
    New(ItemDraft),
}

/// Find a cataloged item by barcode, then SKU, then case-insensitive name.
pub fn find_existing<'a>(analysis: &ItemAnalysis, items: &'a [InventoryItem]) -> Option<&'a InventoryItem> {
    if let Some(code) = analysis.barcode() {
        if let Some(hit) = items.iter().find(|i| i.barcode.as_deref() == Some(code.as_str())) {
            return Some(hit);
        }
    }
    let sku = analysis.likely_sku.trim();
    if !sku.is_empty() {
        if let Some(hit) = items.iter().find(|i| i.sku == sku) {
            return Some(hit);
        }
    }
    let name = analysis.object_name.trim().to_lowercase();
    if name.is_empty() {
        return None;
    }
    items.iter().find(|i| i.name.to_lowercase() == name)
}

/// Draft for an asset the catalog does not know yet
pub fn draft_from_analysis(analysis: &ItemAnalysis) -> ItemDraft {
    let sku = Some(analysis.likely_sku.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(generate_sku);
    let location = Some(analysis.suggested_location.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Unassigned".to_string());
    ItemDraft {
        id: None,
        name: analysis.object_name.trim().to_string(),
        category: analysis.category.trim().to_string(),
        sku,
        barcode: analysis.barcode().unwrap_or_default(),
        stock_count: 1,
        min_stock: 5,
        location,
        price: 0.0,
        image_url: None,
        history: Vec::new(),
    }
}

pub fn resolve(analysis: &ItemAnalysis, items: &[InventoryItem]) -> Recognition {
    match find_existing(analysis, items) {
        Some(item) => Recognition::Existing(item.clone()),
        None => Recognition::New(draft_from_analysis(analysis)),
    }
}

/// Catalog items that look related to the recognized object: same category,
/// or a name containing the first word of the recognized name.
pub fn similar_items<'a>(analysis: &ItemAnalysis, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
    let first_word = analysis
        .object_name
        .split_whitespace()
        .next()
        .map(str::to_lowercase)
        .unwrap_or_default();
    let category = analysis.category.trim().to_lowercase();
    items
        .iter()
        .filter(|i| {
            (!first_word.is_empty() && i.name.to_lowercase().contains(&first_word))
                || (!category.is_empty() && i.category.to_lowercase() == category)
        })
        .take(SIMILAR_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_inventory;
    use chrono::Utc;

    fn analysis(name: &str, category: &str, sku: &str, barcode: Option<&str>) -> ItemAnalysis {
        ItemAnalysis {
            object_name: name.into(),
            category: category.into(),
            estimated_specs: String::new(),
            likely_sku: sku.into(),
            barcode_value: barcode.map(str::to_string),
            suggested_location: String::new(),
            confidence: 0.9,
        }
    }

    #[test]
    fn test_barcode_wins_over_name() {
        let items = seed_inventory(Utc::now());
        let a = analysis("USB-C Hub Multiport", "Accessories", "", Some("223456789012"));
        assert_eq!(find_existing(&a, &items).map(|i| i.id.as_str()), Some("2"));
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let items = seed_inventory(Utc::now());
        let a = analysis("usb-c hub multiport", "Accessories", "", None);
        assert!(matches!(resolve(&a, &items), Recognition::Existing(i) if i.id == "4"));
    }

    #[test]
    fn test_unknown_object_becomes_draft() {
        let items = seed_inventory(Utc::now());
        let a = analysis("Cordless Drill", "Tools", "", Some("None"));
        let Recognition::New(draft) = resolve(&a, &items) else {
            panic!("expected a new draft");
        };
        assert!(draft.is_new());
        assert_eq!(draft.stock_count, 1);
        assert_eq!(draft.min_stock, 5);
        assert_eq!(draft.location, "Unassigned");
        assert!(draft.sku.starts_with("SKU-"));
        assert_eq!(draft.barcode, "");
    }

    #[test]
    fn test_similar_items_limit() {
        let items = seed_inventory(Utc::now());
        let a = analysis("Wireless Headset", "peripherals", "", None);
        let similar: Vec<_> = similar_items(&a, &items).iter().map(|i| i.id.clone()).collect();
        assert_eq!(similar, vec!["1", "2"]);
    }
}
