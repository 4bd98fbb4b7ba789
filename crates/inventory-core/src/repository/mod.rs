//! Repository Layer
//!
//! Key-value persistence partitioned by organization.

mod traits;
mod memory;
mod inventory_repo;
mod session_repo;
mod debounce;

#[cfg(test)]
mod tests;

pub use traits::KeyValueStore;
pub use memory::MemoryStore;
pub use inventory_repo::{InventoryRepository, LoadOutcome, LoadSource};
pub use session_repo::{SessionRepository, AUTH_ORG_KEY, AUTH_USER_KEY};
pub use debounce::DebouncedSaver;
