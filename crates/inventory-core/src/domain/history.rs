//! History Entry Entity
//!
//! Audit records attached to an inventory item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of mutation a history entry records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Creation,
    StockAdjustment,
    LocationChange,
    ConfigUpdate,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Creation => "creation",
            HistoryKind::StockAdjustment => "stock_adjustment",
            HistoryKind::LocationChange => "location_change",
            HistoryKind::ConfigUpdate => "config_update",
        }
    }

    /// Human-readable label for the timeline
    pub fn label(&self) -> &'static str {
        match self {
            HistoryKind::Creation => "creation",
            HistoryKind::StockAdjustment => "stock adjustment",
            HistoryKind::LocationChange => "location change",
            HistoryKind::ConfigUpdate => "config update",
        }
    }
}

/// One immutable audit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub details: String,
    /// Display name of the actor
    pub user: String,
}
