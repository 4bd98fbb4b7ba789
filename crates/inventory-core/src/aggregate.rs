//! Dashboard Aggregates
//!
//! Everything the dashboard shows is derived from the item list on demand.

use crate::domain::InventoryItem;

/// How many recently touched items the dashboard lists
pub const RECENT_LIMIT: usize = 5;

/// Units on hand per category, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryUnits {
    pub name: String,
    pub units: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    /// Sum of price x stock
    pub total_value: f64,
    pub total_units: u64,
    pub low_stock_count: usize,
    /// Share of items that are not low on stock, 0..=100
    pub health_pct: u32,
    pub categories: Vec<CategoryUnits>,
    /// Ids of the most recently updated items, newest first
    pub recent_ids: Vec<String>,
}

pub fn low_stock_items(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    items.iter().filter(|i| i.is_low_stock()).collect()
}

pub fn low_stock_count(items: &[InventoryItem]) -> usize {
    items.iter().filter(|i| i.is_low_stock()).count()
}

pub fn total_value(items: &[InventoryItem]) -> f64 {
    items.iter().map(InventoryItem::valuation).sum()
}

pub fn total_units(items: &[InventoryItem]) -> u64 {
    items.iter().map(|i| u64::from(i.stock_count)).sum()
}

pub fn category_units(items: &[InventoryItem]) -> Vec<CategoryUnits> {
    let mut out: Vec<CategoryUnits> = Vec::new();
    for item in items {
        match out.iter_mut().find(|c| c.name == item.category) {
            Some(c) => c.units += u64::from(item.stock_count),
            None => out.push(CategoryUnits { name: item.category.clone(), units: u64::from(item.stock_count) }),
        }
    }
    out
}

/// Most recently updated items, newest first. Ties keep list order.
pub fn recent_items(items: &[InventoryItem], limit: usize) -> Vec<&InventoryItem> {
    let mut sorted: Vec<&InventoryItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
    sorted.truncate(limit);
    sorted
}

impl DashboardSummary {
    pub fn compute(items: &[InventoryItem]) -> Self {
        let low = low_stock_count(items);
        let health_pct = if items.is_empty() {
            100
        } else {
            ((1.0 - low as f64 / items.len() as f64) * 100.0).round() as u32
        };
        Self {
            total_value: total_value(items),
            total_units: total_units(items),
            low_stock_count: low,
            health_pct,
            categories: category_units(items),
            recent_ids: recent_items(items, RECENT_LIMIT).into_iter().map(|i| i.id.clone()).collect(),
        }
    }
}

/// `12345.5` -> `"12,345.50"`
pub fn format_money(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let (sign, cents) = if cents < 0 { ("-", -cents) } else { ("", cents) };
    format!("{}{}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// `149000` -> `"149,000"`
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_inventory;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_seed_summary() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let summary = DashboardSummary::compute(&seed_inventory(now));
        assert_eq!(summary.total_units, 149);
        assert!((summary.total_value - 10655.55).abs() < 1e-6);
        assert_eq!(summary.low_stock_count, 1);
        assert_eq!(summary.health_pct, 75);
        assert_eq!(
            summary.categories,
            vec![
                CategoryUnits { name: "Peripherals".into(), units: 57 },
                CategoryUnits { name: "Displays".into(), units: 3 },
                CategoryUnits { name: "Accessories".into(), units: 89 },
            ]
        );
    }

    #[test]
    fn test_low_stock_count_matches_predicate() {
        let now = Utc::now();
        let mut items = seed_inventory(now);
        items[0].stock_count = items[0].min_stock;
        let expected = items.iter().filter(|i| i.stock_count <= i.min_stock).count();
        assert_eq!(low_stock_count(&items), expected);
        assert_eq!(low_stock_items(&items).len(), 2);
    }

    #[test]
    fn test_recent_items_newest_first() {
        let now = Utc::now();
        let mut items = seed_inventory(now);
        items[2].last_updated = now + Duration::minutes(5);
        let recent = recent_items(&items, 2);
        assert_eq!(recent[0].id, "3");
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn test_empty_inventory_is_healthy() {
        let summary = DashboardSummary::compute(&[]);
        assert_eq!(summary.health_pct, 100);
        assert_eq!(summary.total_units, 0);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(10655.55), "10,655.55");
        assert_eq!(format_money(0.0), "0.00");
        assert_eq!(format_money(1234567.0), "1,234,567.00");
        assert_eq!(group_thousands(999), "999");
    }
}
