//! Assistant Conversation
//!
//! Builds the inventory context for every turn and keeps the transcript
//! while a reply streams in.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::{format_money, low_stock_count, total_value};
use crate::domain::{ChatMessage, ChatRole, InventoryItem};

/// Shown in place of a reply that failed mid-stream
pub const FAILED_REPLY: &str = "Logical engine error. Connection terminated.";

#[derive(Serialize)]
struct ContextRow<'a> {
    name: &'a str,
    cat: &'a str,
    sku: &'a str,
    stock: u32,
    min: u32,
    loc: &'a str,
    val: f64,
    status: &'static str,
}

/// Pretty-printed JSON snapshot of the inventory handed to the model
pub fn inventory_context(items: &[InventoryItem]) -> String {
    let rows: Vec<ContextRow<'_>> = items
        .iter()
        .map(|i| ContextRow {
            name: &i.name,
            cat: &i.category,
            sku: &i.sku,
            stock: i.stock_count,
            min: i.min_stock,
            loc: &i.location,
            val: i.price,
            status: if i.is_low_stock() { "CRITICAL" } else { "OPTIMAL" },
        })
        .collect();
    serde_json::to_string_pretty(&rows).unwrap_or_else(|_| "[]".to_string())
}

pub fn system_instruction(context: &str) -> String {
    format!(
        "You are the InventoryPro Senior Operations Intelligence Officer.\n\
         Use the following CURRENT INVENTORY DATA to answer queries:\n\
         {context}\n\
         Guidelines: Be precise, show calculations if asked, use markdown. \
         Warn about Critical nodes (stock <= minStock)."
    )
}

/// Opening message of a conversation
pub fn greeting(items: &[InventoryItem]) -> String {
    format!(
        "Operations Officer online. I have analyzed your current repository nodes. \
         System valuation is approximately ${}. We have {} critical alerts. \
         How shall we optimize the current stock distribution?",
        format_money(total_value(items)),
        low_stock_count(items)
    )
}

/// What one chat turn sends to the service
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub message: String,
    pub system_instruction: String,
    /// Prior messages, oldest first
    pub history: Vec<ChatMessage>,
}

/// Message list of the assistant panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Transcript {
    pub fn new(greeting: String, now: DateTime<Utc>) -> Self {
        Self { messages: vec![ChatMessage::new(ChatRole::Model, greeting, now)], pending: false }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// A reply is streaming
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record the user's message and open an empty model reply.
    ///
    /// Returns the turn to send, or `None` for blank input or while a reply
    /// is still streaming.
    pub fn begin_turn(&mut self, input: &str, items: &[InventoryItem], now: DateTime<Utc>) -> Option<ChatTurn> {
        let message = input.trim();
        if message.is_empty() || self.pending {
            return None;
        }
        let history = self.messages.clone();
        self.messages.push(ChatMessage::new(ChatRole::User, message, now));
        self.messages.push(ChatMessage::new(ChatRole::Model, String::new(), now));
        self.pending = true;
        Some(ChatTurn {
            message: message.to_string(),
            system_instruction: system_instruction(&inventory_context(items)),
            history,
        })
    }

    /// Append a streamed chunk to the pending reply
    pub fn push_chunk(&mut self, chunk: &str) {
        if !self.pending {
            return;
        }
        if let Some(last) = self.messages.last_mut().filter(|m| m.role == ChatRole::Model) {
            last.text.push_str(chunk);
        }
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }

    /// Replace the pending reply with the failure notice
    pub fn fail(&mut self, now: DateTime<Utc>) {
        if self.pending {
            self.messages.pop();
            self.messages.push(ChatMessage::new(ChatRole::Model, FAILED_REPLY, now));
        }
        self.pending = false;
    }

    /// The pending reply exists but nothing has arrived yet
    pub fn awaiting_first_chunk(&self) -> bool {
        self.pending && self.messages.last().map_or(false, |m| m.text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_inventory;

    #[test]
    fn test_context_marks_critical() {
        let items = seed_inventory(Utc::now());
        let context = inventory_context(&items);
        let parsed: serde_json::Value = serde_json::from_str(&context).unwrap();
        assert_eq!(parsed[2]["status"], "CRITICAL");
        assert_eq!(parsed[0]["status"], "OPTIMAL");
        assert_eq!(parsed[0]["stock"], 45);
        assert!(system_instruction(&context).contains("MS-ERG-001"));
    }

    #[test]
    fn test_greeting_reports_totals() {
        let items = seed_inventory(Utc::now());
        let text = greeting(&items);
        assert!(text.contains("$10,655.55"));
        assert!(text.contains("1 critical alerts"));
    }

    #[test]
    fn test_turn_history_excludes_pending_reply() {
        let now = Utc::now();
        let items = seed_inventory(now);
        let mut t = Transcript::new(greeting(&items), now);
        let turn = t.begin_turn("  what is low?  ", &items, now).unwrap();
        assert_eq!(turn.message, "what is low?");
        assert_eq!(turn.history.len(), 1);
        assert!(t.awaiting_first_chunk());
        assert!(t.begin_turn("again", &items, now).is_none());

        t.push_chunk("The monitor ");
        t.push_chunk("is critical.");
        t.finish();
        assert_eq!(t.messages().last().unwrap().text, "The monitor is critical.");

        let turn = t.begin_turn("thanks", &items, now).unwrap();
        assert_eq!(turn.history.len(), 3);
    }

    #[test]
    fn test_failure_replaces_pending_reply() {
        let now = Utc::now();
        let mut t = Transcript::new("hi".into(), now);
        t.begin_turn("hello", &[], now).unwrap();
        t.push_chunk("partial");
        t.fail(now);
        assert!(!t.is_pending());
        assert_eq!(t.messages().len(), 3);
        assert_eq!(t.messages()[2].text, FAILED_REPLY);
    }

    #[test]
    fn test_blank_input_ignored() {
        let now = Utc::now();
        let mut t = Transcript::new("hi".into(), now);
        assert!(t.begin_turn("   ", &[], now).is_none());
        assert_eq!(t.messages().len(), 1);
    }
}
