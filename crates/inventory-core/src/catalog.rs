//! Catalog Filtering and Export
//!
//! Search / category filter for the stock list, and the CSV export of
//! whatever the filter currently shows.

use chrono::NaiveDate;

use crate::domain::InventoryItem;
use crate::error::{AppError, AppResult};

/// Label of the "no category filter" option
pub const ALL_CATEGORIES: &str = "All";

/// Export header row
pub const CSV_HEADERS: [&str; 6] = ["Name", "Category", "SKU", "Stock", "Location", "Price"];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring over name, SKU and category
    pub search: String,
    /// `None` means all categories
    pub category: Option<String>,
}

impl CatalogFilter {
    pub fn new(search: impl Into<String>, category: Option<String>) -> Self {
        let category = category.filter(|c| c != ALL_CATEGORIES && !c.is_empty());
        Self { search: search.into(), category }
    }

    pub fn matches(&self, item: &InventoryItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item.sku.to_lowercase().contains(&needle)
            || item.category.to_lowercase().contains(&needle);
        let matches_category = self.category.as_deref().map_or(true, |c| item.category == c);
        matches_search && matches_category
    }

    pub fn apply<'a>(&self, items: &'a [InventoryItem]) -> Vec<&'a InventoryItem> {
        items.iter().filter(|i| self.matches(i)).collect()
    }
}

/// Category options for the filter menu: `All` followed by the sorted
/// distinct categories.
pub fn categories(items: &[InventoryItem]) -> Vec<String> {
    let mut cats: Vec<String> = items.iter().map(|i| i.category.clone()).collect();
    cats.sort();
    cats.dedup();
    cats.insert(0, ALL_CATEGORIES.to_string());
    cats
}

/// Render items as CSV with a header row. Fields containing commas,
/// quotes or newlines are quoted.
pub fn export_csv<'a, I>(items: I) -> AppResult<String>
where
    I: IntoIterator<Item = &'a InventoryItem>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS).map_err(csv_error)?;
    for item in items {
        let stock = item.stock_count.to_string();
        let price = item.price.to_string();
        writer
            .write_record([
                item.name.as_str(),
                item.category.as_str(),
                item.sku.as_str(),
                stock.as_str(),
                item.location.as_str(),
                price.as_str(),
            ])
            .map_err(csv_error)?;
    }
    let bytes = writer.into_inner().map_err(|e| AppError::Storage(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Storage(e.to_string()))
}

/// `inventory_2024-05-01.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("inventory_{}.csv", date.format("%Y-%m-%d"))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Storage(format!("CSV export failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_inventory;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[case("", None, 4)]
    #[case("mouse", None, 1)]
    #[case("KB-MEC", None, 1)]
    #[case("periph", None, 2)]
    #[case("", Some("Displays"), 1)]
    #[case("", Some("All"), 4)]
    #[case("hub", Some("Peripherals"), 0)]
    fn test_filter_and_export_rows(#[case] search: &str, #[case] category: Option<&str>, #[case] expected: usize) {
        let items = seed_inventory(Utc::now());
        let filter = CatalogFilter::new(search, category.map(str::to_string));
        let visible = filter.apply(&items);
        assert_eq!(visible.len(), expected);

        let csv = export_csv(visible).unwrap();
        assert_eq!(csv.lines().count(), expected + 1);
    }

    #[test]
    fn test_categories_sorted_with_all_first() {
        let items = seed_inventory(Utc::now());
        assert_eq!(categories(&items), vec!["All", "Accessories", "Displays", "Peripherals"]);
    }

    #[test]
    fn test_export_quotes_fields() {
        let items = seed_inventory(Utc::now());
        let csv = export_csv(items.iter().filter(|i| i.id == "3")).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Name,Category,SKU,Stock,Location,Price"));
        assert_eq!(lines.next(), Some("\"4K OLED Monitor 27\"\"\",Displays,MN-4KO-003,3,Back Room - Row 4,799"));
    }

    #[test]
    fn test_export_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(export_filename(date), "inventory_2024-05-01.csv");
    }
}
