//! Repository Integration Tests
//!
//! Inventory, session and debounced saving against the in-memory store.

#[cfg(test)]
mod tests {
    use crate::config::DEFAULT_STORAGE_PREFIX;
    use crate::domain::Session;
    use crate::error::AppError;
    use crate::reconcile::apply_save;
    use crate::repository::{
        DebouncedSaver, InventoryRepository, KeyValueStore, LoadSource, MemoryStore, SessionRepository,
        AUTH_ORG_KEY, AUTH_USER_KEY,
    };
    use crate::seed::seed_inventory;
    use chrono::{TimeZone, Utc};
    use std::rc::Rc;

    fn setup_repo() -> (Rc<MemoryStore>, InventoryRepository<Rc<MemoryStore>>) {
        let store = Rc::new(MemoryStore::new());
        let repo = InventoryRepository::new(Rc::clone(&store), DEFAULT_STORAGE_PREFIX);
        (store, repo)
    }

    #[test]
    fn test_key_is_partitioned_by_org() {
        let (_, repo) = setup_repo();
        assert_eq!(repo.key("acme"), "inventory_pro_org_v2_acme");
    }

    #[test]
    fn test_round_trip() {
        let (_, repo) = setup_repo();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap();
        let mut items = seed_inventory(now);
        let mut edit = items[1].clone();
        edit.stock_count = 2;
        edit.location = "Cage 3".into();
        apply_save(&mut items, edit, "Ada", now);

        repo.save("acme", &items).expect("save failed");
        let loaded = repo.load("acme").expect("load failed").expect("nothing stored");
        assert_eq!(loaded, items);
    }

    #[test]
    fn test_missing_org_is_not_found() {
        let (_, repo) = setup_repo();
        assert_eq!(repo.load("nobody").unwrap(), None);
    }

    #[test]
    fn test_empty_load_falls_back_to_seed() {
        let (store, repo) = setup_repo();
        store.set(&repo.key("acme"), "[]").unwrap();
        let outcome = repo.load_or_seed("acme", Utc::now());

        assert_eq!(outcome.source, LoadSource::Seeded);
        let ids: Vec<_> = outcome.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
        let units: u32 = outcome.items.iter().map(|i| i.stock_count).sum();
        assert_eq!(units, 149);
    }

    #[test]
    fn test_corrupt_snapshot_recovers_with_seed() {
        let (store, repo) = setup_repo();
        store.set(&repo.key("acme"), "{\"truncated\":").unwrap();

        assert!(matches!(repo.load("acme"), Err(AppError::StorageCorruption(_))));
        let outcome = repo.load_or_seed("acme", Utc::now());
        assert!(matches!(outcome.source, LoadSource::Recovered(AppError::StorageCorruption(_))));
        assert_eq!(outcome.items.len(), 4);
    }

    #[test]
    fn test_organizations_do_not_share_inventory() {
        let (_, repo) = setup_repo();
        let items = seed_inventory(Utc::now());
        repo.save("acme", &items[..1]).unwrap();
        repo.save("globex", &items[1..]).unwrap();
        assert_eq!(repo.load("acme").unwrap().unwrap().len(), 1);
        assert_eq!(repo.load("globex").unwrap().unwrap().len(), 3);
    }

    #[test]
    fn test_session_round_trip_and_clear() {
        let store = MemoryStore::new();
        let sessions = SessionRepository::new(&store);
        assert!(sessions.load().is_none());

        let session = Session::register("Ada", "ada@acme.io", "Acme Corp").unwrap();
        sessions.save(&session).unwrap();
        assert_eq!(sessions.load(), Some(session));

        sessions.clear().unwrap();
        assert!(sessions.load().is_none());
        assert_eq!(store.get(AUTH_USER_KEY).unwrap(), None);
    }

    #[test]
    fn test_half_session_is_ignored() {
        let store = MemoryStore::new();
        let sessions = SessionRepository::new(&store);
        let session = Session::register("Ada", "ada@acme.io", "Acme Corp").unwrap();
        sessions.save(&session).unwrap();
        store.set(AUTH_ORG_KEY, "not json").unwrap();
        assert!(sessions.load().is_none());
    }

    #[test]
    fn test_debounce_last_write_wins() {
        let (_, repo) = setup_repo();
        let mut saver = DebouncedSaver::new(repo);
        let items = seed_inventory(Utc::now());

        let first = saver.stage("acme", items[..1].to_vec());
        let second = saver.stage("acme", items.clone());

        assert!(!saver.flush_if_current(first).unwrap());
        assert!(saver.has_pending());
        assert!(saver.flush_if_current(second).unwrap());
        assert!(!saver.has_pending());
        assert_eq!(saver.repository().load("acme").unwrap().unwrap().len(), 4);
    }

    #[test]
    fn test_debounce_flush_and_cancel() {
        let (_, repo) = setup_repo();
        let mut saver = DebouncedSaver::new(repo);
        let items = seed_inventory(Utc::now());

        saver.stage("acme", items.clone());
        saver.cancel();
        assert!(!saver.flush().unwrap());
        assert_eq!(saver.repository().load("acme").unwrap(), None);

        saver.stage("acme", items);
        assert!(saver.flush().unwrap());
        assert!(saver.repository().load("acme").unwrap().is_some());
    }
}
