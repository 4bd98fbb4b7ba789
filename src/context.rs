//! Application Context
//!
//! Services shared via Leptos Context API. They are `!Send`, so they sit
//! in local stored values and the context itself stays `Copy`.

use std::rc::Rc;

use inventory_core::service::{ChatService, VisionService};
use inventory_core::AppConfig;
use leptos::prelude::*;

use crate::storage::Persistence;

#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    vision: StoredValue<Rc<dyn VisionService>, LocalStorage>,
    chat: StoredValue<Rc<dyn ChatService>, LocalStorage>,
    persistence: StoredValue<Rc<Persistence>, LocalStorage>,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        vision: Rc<dyn VisionService>,
        chat: Rc<dyn ChatService>,
        persistence: Persistence,
    ) -> Self {
        Self {
            config: StoredValue::new(config),
            vision: StoredValue::new_local(vision),
            chat: StoredValue::new_local(chat),
            persistence: StoredValue::new_local(Rc::new(persistence)),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    pub fn vision(&self) -> Rc<dyn VisionService> {
        self.vision.get_value()
    }

    pub fn chat(&self) -> Rc<dyn ChatService> {
        self.chat.get_value()
    }

    pub fn persistence(&self) -> Rc<Persistence> {
        self.persistence.get_value()
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
