//! Browser Persistence
//!
//! `localStorage` behind the core `KeyValueStore` contract, and the
//! quiet-period timer that drives the debounced saver.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use gloo_timers::callback::Timeout;
use inventory_core::domain::InventoryItem;
use inventory_core::repository::{
    DebouncedSaver, InventoryRepository, KeyValueStore, LoadOutcome, LoadSource, SessionRepository,
};
use inventory_core::{AppConfig, AppError, AppResult};

/// `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage(&self) -> AppResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or_else(|| AppError::Storage("localStorage is unavailable".into()))
    }
}

fn js_error(e: wasm_bindgen::JsValue) -> AppError {
    AppError::Storage(format!("{:?}", e))
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}

pub fn session_repository() -> SessionRepository<BrowserStorage> {
    SessionRepository::new(BrowserStorage)
}

/// Inventory persistence for the running app
pub struct Persistence {
    saver: Rc<RefCell<DebouncedSaver<BrowserStorage>>>,
    timer: RefCell<Option<Timeout>>,
    debounce_ms: u32,
}

impl Persistence {
    pub fn new(config: &AppConfig) -> Self {
        let repo = InventoryRepository::new(BrowserStorage, config.storage_prefix.clone());
        Self {
            saver: Rc::new(RefCell::new(DebouncedSaver::new(repo))),
            timer: RefCell::new(None),
            debounce_ms: config.save_debounce_ms,
        }
    }

    pub fn load(&self, org_id: &str) -> Vec<InventoryItem> {
        let LoadOutcome { items, source } = self.saver.borrow().repository().load_or_seed(org_id, Utc::now());
        match source {
            LoadSource::Stored => log::info!("loaded {} items for {}", items.len(), org_id),
            LoadSource::Seeded => log::info!("no inventory stored for {}, using seed data", org_id),
            LoadSource::Recovered(err) => log::warn!("inventory for {} unreadable ({}), using seed data", org_id, err),
        }
        items
    }

    /// Stage a snapshot and (re)start the quiet-period timer. Replacing the
    /// timer cancels the previous one.
    pub fn schedule(&self, org_id: &str, items: Vec<InventoryItem>) {
        let ticket = self.saver.borrow_mut().stage(org_id, items);
        let saver = Rc::clone(&self.saver);
        let timeout = Timeout::new(self.debounce_ms, move || {
            match saver.borrow_mut().flush_if_current(ticket) {
                Ok(true) => log::debug!("inventory saved (ticket {})", ticket),
                Ok(false) => {}
                Err(e) => log::error!("inventory save failed: {}", e),
            }
        });
        self.timer.replace(Some(timeout));
    }

    /// Write any pending snapshot now
    pub fn flush(&self) {
        self.timer.take();
        if let Err(e) = self.saver.borrow_mut().flush() {
            log::error!("inventory save failed: {}", e);
        }
    }
}
