//! InventoryPro Frontend App
//!
//! Session gate, shell layout, active view and the item editor overlay.

use std::rc::Rc;

use leptos::prelude::*;
use reactive_stores::Store;

use inventory_core::domain::Session;

use crate::components::{AuthForm, ChatPanel, Dashboard, EditItemModal, Layout, Scanner, StockList};
use crate::context::AppContext;
use crate::models::ViewMode;
use crate::services;
use crate::storage::{self, Persistence};
use crate::store::{AppState, AppStateStoreFields, AppStore};

#[component]
pub fn App() -> impl IntoView {
    let config = services::load_config();
    let client = Rc::new(services::build_client(&config));
    let persistence = Persistence::new(&config);
    let ctx = AppContext::new(config, client.clone(), client, persistence);
    provide_context(ctx);

    let store: AppStore = Store::new(AppState {
        session: storage::session_repository().load(),
        ..Default::default()
    });
    provide_context(store);

    // Load the organization's inventory whenever the session changes
    Effect::new(move |_| {
        let org_id = store.session().with(|s| s.as_ref().map(|s| s.organization.id.clone()));
        match org_id {
            Some(org_id) => store.items().set(ctx.persistence().load(&org_id)),
            None => store.items().set(Vec::new()),
        }
    });

    // Debounced save on every inventory change
    Effect::new(move |prev: Option<()>| {
        let items = store.items().get();
        let org_id = store.session().with_untracked(|s| s.as_ref().map(|s| s.organization.id.clone()));
        // The first run only mirrors what was just loaded
        if prev.is_none() {
            return;
        }
        if let Some(org_id) = org_id {
            ctx.persistence().schedule(&org_id, items);
        }
    });

    let on_login = Callback::new(move |session: Session| {
        if let Err(e) = storage::session_repository().save(&session) {
            log::error!("could not persist session: {}", e);
        }
        log::info!("session opened for {}", session.organization.id);
        store.view().set(ViewMode::Dashboard);
        store.editing().set(None);
        store.session().set(Some(session));
    });

    let on_logout = Callback::new(move |_: ()| {
        ctx.persistence().flush();
        if let Err(e) = storage::session_repository().clear() {
            log::error!("could not clear session: {}", e);
        }
        log::info!("session closed");
        store.editing().set(None);
        store.view().set(ViewMode::Dashboard);
        store.session().set(None);
    });

    view! {
        <Show
            when=move || store.session().with(Option::is_some)
            fallback=move || view! { <AuthForm on_login=on_login /> }
        >
            <Layout on_logout=on_logout>
                {move || match store.view().get() {
                    ViewMode::Dashboard => view! { <Dashboard /> }.into_any(),
                    ViewMode::Inventory => view! { <StockList /> }.into_any(),
                    ViewMode::Scanner => view! { <Scanner /> }.into_any(),
                    ViewMode::Chat => view! { <ChatPanel /> }.into_any(),
                }}
                <Show when=move || store.editing().with(Option::is_some)>
                    <EditItemModal />
                </Show>
            </Layout>
        </Show>
    }
}
