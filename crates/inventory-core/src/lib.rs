//! InventoryPro Core
//!
//! Layered like the UI expects it:
//! - domain: entities (items, history, identity, chat, vision results)
//! - repository: key-value persistence, session keys, debounced saving
//! - reconcile / aggregate / catalog: pure logic over the item collection
//! - capture: capture workflow state machine
//! - service: seams to the remote vision and chat service

pub mod aggregate;
pub mod capture;
pub mod catalog;
pub mod chat;
pub mod config;
pub mod domain;
pub mod error;
pub mod matching;
pub mod reconcile;
pub mod repository;
pub mod seed;
pub mod service;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
