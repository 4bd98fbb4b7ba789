//! Reconciliation on Save
//!
//! Diffs an incoming edit against the stored item and turns every
//! observable change into history entries.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{upsert_front, HistoryEntry, HistoryKind, InventoryItem};

/// Maximum history entries kept per item
pub const HISTORY_CAP: usize = 20;

/// Actor recorded when nobody is signed in
pub const SYSTEM_ACTOR: &str = "System";

fn history_entry_id() -> String {
    format!("log_{}", Uuid::new_v4().simple())
}

/// Merge `incoming` over `existing`.
///
/// - new items get a single `creation` entry
/// - stock changes get a `stock_adjustment` entry with before/after values
/// - location changes get a `location_change` entry
/// - any other field change gets one `config_update` entry naming the fields
///
/// The stored history is authoritative; whatever history `incoming` carries
/// is ignored. Entry timestamps never go backwards.
pub fn reconcile(
    existing: Option<&InventoryItem>,
    incoming: InventoryItem,
    actor: &str,
    now: DateTime<Utc>,
) -> InventoryItem {
    let actor = if actor.trim().is_empty() { SYSTEM_ACTOR } else { actor };

    let Some(existing) = existing else {
        let entry = HistoryEntry {
            id: history_entry_id(),
            timestamp: now,
            kind: HistoryKind::Creation,
            details: "Registered in catalog".to_string(),
            user: actor.to_string(),
        };
        return InventoryItem { last_updated: now, history: vec![entry], ..incoming };
    };

    let stamp = existing
        .history
        .last()
        .map_or(now, |last| now.max(last.timestamp));

    let mut history = existing.history.clone();
    history.extend(changes(existing, &incoming).into_iter().map(|(kind, details)| {
        HistoryEntry {
            id: history_entry_id(),
            timestamp: stamp,
            kind,
            details,
            user: actor.to_string(),
        }
    }));
    if history.len() > HISTORY_CAP {
        history.drain(..history.len() - HISTORY_CAP);
    }

    InventoryItem { last_updated: now, history, ..incoming }
}

/// The history-worthy differences between two versions of an item
pub fn changes(before: &InventoryItem, after: &InventoryItem) -> Vec<(HistoryKind, String)> {
    let mut out = Vec::new();

    if before.stock_count != after.stock_count {
        out.push((
            HistoryKind::StockAdjustment,
            format!("Stock change: {} to {}", before.stock_count, after.stock_count),
        ));
    }
    if before.location != after.location {
        out.push((HistoryKind::LocationChange, format!("Moved to {}", after.location)));
    }

    let mut fields = Vec::new();
    if before.name != after.name {
        fields.push("name");
    }
    if before.category != after.category {
        fields.push("category");
    }
    if before.sku != after.sku {
        fields.push("sku");
    }
    if before.barcode != after.barcode {
        fields.push("barcode");
    }
    if before.min_stock != after.min_stock {
        fields.push("minStock");
    }
    if before.price != after.price {
        fields.push("price");
    }
    if before.image_url != after.image_url {
        fields.push("imageUrl");
    }
    if !fields.is_empty() {
        out.push((HistoryKind::ConfigUpdate, format!("Updated {}", fields.join(", "))));
    }

    out
}

/// Reconcile `incoming` against the collection and store the result.
///
/// New items go to the front, existing ones are replaced in place.
pub fn apply_save(
    items: &mut Vec<InventoryItem>,
    incoming: InventoryItem,
    actor: &str,
    now: DateTime<Utc>,
) -> InventoryItem {
    let existing = items.iter().find(|i| i.id == incoming.id);
    let updated = reconcile(existing, incoming, actor, now);
    upsert_front(items, updated.clone());
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn base_item() -> InventoryItem {
        InventoryItem {
            id: "asset_1".into(),
            name: "Drill".into(),
            category: "Tools".into(),
            sku: "DRL-001".into(),
            barcode: None,
            stock_count: 10,
            min_stock: 2,
            location: "Bay 1".into(),
            price: 99.0,
            last_updated: t0(),
            image_url: None,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_new_item_gets_creation_entry() {
        let created = reconcile(None, base_item(), "Ada", t0());
        assert_eq!(created.history.len(), 1);
        assert_eq!(created.history[0].kind, HistoryKind::Creation);
        assert_eq!(created.history[0].user, "Ada");
        assert_eq!(created.last_updated, t0());
    }

    #[test]
    fn test_blank_actor_is_system() {
        let created = reconcile(None, base_item(), "  ", t0());
        assert_eq!(created.history[0].user, SYSTEM_ACTOR);
    }

    #[test]
    fn test_stock_change_entry() {
        let stored = reconcile(None, base_item(), "Ada", t0());
        let mut edit = stored.clone();
        edit.stock_count = 7;
        let saved = reconcile(Some(&stored), edit, "Ada", t0() + Duration::minutes(1));

        assert_eq!(saved.history.len(), 2);
        let last = saved.history.last().unwrap();
        assert_eq!(last.kind, HistoryKind::StockAdjustment);
        assert_eq!(last.details, "Stock change: 10 to 7");
    }

    #[test]
    fn test_stock_and_location_change_two_entries() {
        let stored = reconcile(None, base_item(), "Ada", t0());
        let mut edit = stored.clone();
        edit.stock_count = 11;
        edit.location = "Bay 9".into();
        let saved = reconcile(Some(&stored), edit, "Bo", t0() + Duration::minutes(1));

        let kinds: Vec<_> = saved.history.iter().skip(1).map(|e| e.kind).collect();
        assert_eq!(kinds, vec![HistoryKind::StockAdjustment, HistoryKind::LocationChange]);
        assert_eq!(saved.history[2].details, "Moved to Bay 9");
        assert_ne!(saved.history[1].id, saved.history[2].id);
    }

    #[test]
    fn test_entry_ids_stay_unique_past_cap_and_clock_skew() {
        let mut stored = reconcile(None, base_item(), "Ada", t0());
        for step in 1..=25 {
            let mut edit = stored.clone();
            edit.stock_count = step;
            stored = reconcile(Some(&stored), edit, "Ada", t0() + Duration::seconds(i64::from(step)));
        }
        // clock stepped back: both saves clamp to the same stamp
        for stock in [100, 101] {
            let mut edit = stored.clone();
            edit.stock_count = stock;
            stored = reconcile(Some(&stored), edit, "Ada", t0() + Duration::seconds(20));
        }

        assert_eq!(stored.history.len(), HISTORY_CAP);
        let ids: std::collections::HashSet<_> = stored.history.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids.len(), HISTORY_CAP);
        assert!(stored.history.iter().all(|e| e.id.starts_with("log_")));
    }

    #[test]
    fn test_config_fields_collapse_into_one_entry() {
        let stored = reconcile(None, base_item(), "Ada", t0());
        let mut edit = stored.clone();
        edit.price = 120.0;
        edit.min_stock = 4;
        let saved = reconcile(Some(&stored), edit, "Ada", t0());

        assert_eq!(saved.history.len(), 2);
        assert_eq!(saved.history[1].kind, HistoryKind::ConfigUpdate);
        assert_eq!(saved.history[1].details, "Updated minStock, price");
    }

    #[test]
    fn test_incoming_history_is_ignored() {
        let stored = reconcile(None, base_item(), "Ada", t0());
        let mut edit = stored.clone();
        edit.history.clear();
        let saved = reconcile(Some(&stored), edit, "Ada", t0());
        assert_eq!(saved.history, stored.history);
    }

    #[test]
    fn test_timestamps_never_go_backwards() {
        let stored = reconcile(None, base_item(), "Ada", t0());
        let mut edit = stored.clone();
        edit.stock_count = 1;
        let saved = reconcile(Some(&stored), edit, "Ada", t0() - Duration::hours(3));
        assert_eq!(saved.history[1].timestamp, t0());
    }

    #[test]
    fn test_apply_save_prepends_and_replaces() {
        let mut items = vec![reconcile(None, base_item(), "Ada", t0())];
        let mut other = base_item();
        other.id = "asset_2".into();
        apply_save(&mut items, other, "Ada", t0());
        assert_eq!(items[0].id, "asset_2");

        let mut edit = items[1].clone();
        edit.stock_count = 0;
        apply_save(&mut items, edit, "Ada", t0());
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].stock_count, 0);
        assert_eq!(items[1].history.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_identical_save_appends_nothing(stock in 0u32..500, min in 0u32..50, saves in 1usize..5) {
            let mut item = base_item();
            item.stock_count = stock;
            item.min_stock = min;
            let mut stored = reconcile(None, item, "Ada", t0());
            let len = stored.history.len();
            for n in 0..saves {
                let next = reconcile(Some(&stored), stored.clone(), "Ada", t0() + Duration::seconds(n as i64));
                stored = next;
            }
            prop_assert_eq!(stored.history.len(), len);
        }

        #[test]
        fn prop_history_is_capped_and_ordered(counts in proptest::collection::vec(0u32..1000, 1..60)) {
            let mut stored = reconcile(None, base_item(), "Ada", t0());
            for (n, count) in counts.iter().enumerate() {
                let before = stored.stock_count;
                let mut edit = stored.clone();
                edit.stock_count = *count;
                let before_len = stored.history.len();
                stored = reconcile(Some(&stored), edit, "Ada", t0() + Duration::seconds(n as i64));

                prop_assert!(stored.history.len() <= HISTORY_CAP);
                if before != *count {
                    let last = stored.history.last().unwrap();
                    prop_assert_eq!(last.kind, HistoryKind::StockAdjustment);
                    prop_assert_eq!(&last.details, &format!("Stock change: {} to {}", before, count));
                    prop_assert_eq!(stored.history.len(), (before_len + 1).min(HISTORY_CAP));
                }
                prop_assert!(stored.history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
            }
        }
    }
}
