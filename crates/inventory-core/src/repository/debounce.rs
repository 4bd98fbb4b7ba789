//! Debounced Saving
//!
//! Edits stage a snapshot and get a ticket; only the latest ticket writes.
//! The quiet-period timer itself belongs to the caller.

use super::inventory_repo::InventoryRepository;
use super::traits::KeyValueStore;
use crate::domain::InventoryItem;
use crate::error::AppResult;

struct PendingWrite {
    org_id: String,
    items: Vec<InventoryItem>,
    ticket: u64,
}

pub struct DebouncedSaver<S> {
    repo: InventoryRepository<S>,
    pending: Option<PendingWrite>,
    next_ticket: u64,
}

impl<S: KeyValueStore> DebouncedSaver<S> {
    pub fn new(repo: InventoryRepository<S>) -> Self {
        Self { repo, pending: None, next_ticket: 0 }
    }

    pub fn repository(&self) -> &InventoryRepository<S> {
        &self.repo
    }

    /// Replace any pending snapshot (last write wins)
    pub fn stage(&mut self, org_id: &str, items: Vec<InventoryItem>) -> u64 {
        self.next_ticket += 1;
        self.pending = Some(PendingWrite { org_id: org_id.to_string(), items, ticket: self.next_ticket });
        self.next_ticket
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Timer callback: write only if nothing newer was staged since
    pub fn flush_if_current(&mut self, ticket: u64) -> AppResult<bool> {
        match &self.pending {
            Some(p) if p.ticket == ticket => self.flush(),
            _ => Ok(false),
        }
    }

    /// Write whatever is pending now
    pub fn flush(&mut self) -> AppResult<bool> {
        let Some(write) = self.pending.take() else {
            return Ok(false);
        };
        self.repo.save(&write.org_id, &write.items)?;
        Ok(true)
    }

    /// Drop the pending snapshot without writing
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
