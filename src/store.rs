//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use chrono::Utc;
use leptos::prelude::*;
use reactive_stores::Store;

use inventory_core::domain::{remove_by_id, InventoryItem, ItemDraft, Session};
use inventory_core::reconcile::{apply_save, SYSTEM_ACTOR};

use crate::models::ViewMode;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user and organization
    pub session: Option<Session>,
    /// Inventory of the current organization
    pub items: Vec<InventoryItem>,
    /// Active screen
    pub view: ViewMode,
    /// Item open in the editor (None = editor closed)
    pub editing: Option<ItemDraft>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Name recorded in history entries
pub fn store_actor(store: &AppStore) -> String {
    store
        .session()
        .with_untracked(|s| s.as_ref().map(|s| s.user.name.clone()))
        .unwrap_or_else(|| SYSTEM_ACTOR.to_string())
}

/// Commit a draft: reconcile against the stored version, upsert, close editor
pub fn store_save_draft(store: &AppStore, draft: ItemDraft) -> InventoryItem {
    let now = Utc::now();
    let actor = store_actor(store);
    let saved = apply_save(&mut store.items().write(), draft.into_item(now), &actor, now);
    log::info!("saved item {} ({} history entries)", saved.id, saved.history.len());
    store.editing().set(None);
    saved
}

/// Remove an item from the store by ID
pub fn store_remove_item(store: &AppStore, item_id: &str) {
    if remove_by_id(&mut store.items().write(), item_id) {
        log::info!("deleted item {}", item_id);
    }
    store.editing().set(None);
}

/// Open the editor
pub fn store_open_editor(store: &AppStore, draft: ItemDraft) {
    store.editing().set(Some(draft));
}

pub fn store_set_view(store: &AppStore, view: ViewMode) {
    store.view().set(view);
}
