//! Domain Layer - Core Entity Trait
//!
//! The basic contract for entities kept in ordered collections.

/// Core trait for all domain entities
pub trait Entity: Clone {
    /// Returns the entity's unique identifier
    fn id(&self) -> &str;
}

/// Replace the entity with the same id in place, or put it at the front.
///
/// Returns `true` when an existing entry was replaced.
pub fn upsert_front<T: Entity>(collection: &mut Vec<T>, entity: T) -> bool {
    match collection.iter_mut().find(|e| e.id() == entity.id()) {
        Some(slot) => {
            *slot = entity;
            true
        }
        None => {
            collection.insert(0, entity);
            false
        }
    }
}

/// Remove the entity with the given id. Returns `true` if something was removed.
pub fn remove_by_id<T: Entity>(collection: &mut Vec<T>, id: &str) -> bool {
    let before = collection.len();
    collection.retain(|e| e.id() != id);
    collection.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Named(&'static str, u32);

    impl Entity for Named {
        fn id(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut list = vec![Named("a", 1), Named("b", 1)];
        assert!(upsert_front(&mut list, Named("b", 2)));
        assert_eq!(list, vec![Named("a", 1), Named("b", 2)]);
    }

    #[test]
    fn test_upsert_prepends_new() {
        let mut list = vec![Named("a", 1)];
        assert!(!upsert_front(&mut list, Named("c", 1)));
        assert_eq!(list[0], Named("c", 1));
    }

    #[test]
    fn test_remove_by_id() {
        let mut list = vec![Named("a", 1), Named("b", 1)];
        assert!(remove_by_id(&mut list, "a"));
        assert!(!remove_by_id(&mut list, "zzz"));
        assert_eq!(list.len(), 1);
    }
}
