//! Domain Layer
//!
//! Contains all domain entities and core abstractions.
//! No browser or network dependencies live here.

mod entity;
mod item;
mod history;
mod identity;
mod draft;
mod chat;
mod vision;

pub use entity::{Entity, remove_by_id, upsert_front};
pub use item::InventoryItem;
pub use history::{HistoryEntry, HistoryKind};
pub use identity::{Organization, Role, Session, User};
pub use draft::{DraftField, ItemDraft, generate_asset_id, generate_sku};
pub use chat::{ChatMessage, ChatRole};
pub use vision::{BoundingBox, DetectedObject, ItemAnalysis, normalize_code};
