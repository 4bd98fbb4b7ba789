//! InventoryPro Frontend Entry Point

mod app;
mod components;
mod context;
mod markdown;
mod models;
mod services;
mod storage;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    rolling_logger::init_logger(log::LevelFilter::Info);
    mount_to_body(App);
}
