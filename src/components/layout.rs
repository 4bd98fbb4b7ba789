//! Shell Layout Component
//!
//! Sidebar navigation, header with low-stock bell and user menu.

use leptos::prelude::*;

use inventory_core::aggregate::low_stock_count;

use crate::models::{first_name, initials, ViewMode};
use crate::store::{store_set_view, use_app_store, AppStateStoreFields};

#[component]
pub fn Layout(#[prop(into)] on_logout: Callback<()>, children: Children) -> impl IntoView {
    let store = use_app_store();
    let (menu_open, set_menu_open) = signal(false);
    let (drawer_open, set_drawer_open) = signal(false);

    let low_stock = Memo::new(move |_| store.items().with(|items| low_stock_count(items)));
    let user = move || store.session().with(|s| s.as_ref().map(|s| s.user.clone()));
    let org = move || store.session().with(|s| s.as_ref().map(|s| s.organization.clone()));

    let nav = move || {
        ViewMode::ALL
            .iter()
            .map(|&view| {
                view! {
                    <button
                        class=move || if store.view().get() == view { "nav-item active" } else { "nav-item" }
                        on:click=move |_| {
                            store_set_view(&store, view);
                            set_drawer_open.set(false);
                        }
                    >
                        <span class="nav-icon">{view.icon()}</span>
                        <span class="nav-label">{view.nav_label()}</span>
                    </button>
                }
            })
            .collect_view()
    };

    view! {
        <div class="app-layout">
            <aside class=move || if drawer_open.get() { "sidebar open" } else { "sidebar" }>
                <div class="brand">
                    <div class="brand-logo">"▣"</div>
                    <div>
                        <h1 class="brand-title">"Inventory" <span class="accent">"Pro"</span></h1>
                        <div class="brand-org">{move || org().map(|o| o.name).unwrap_or_default()}</div>
                    </div>
                </div>
                <nav class="nav">
                    <div class="nav-heading">"Operations Hub"</div>
                    {nav}
                </nav>
            </aside>
            <Show when=move || drawer_open.get()>
                <div class="drawer-backdrop" on:click=move |_| set_drawer_open.set(false)></div>
            </Show>

            <main class="main-content">
                <header class="header">
                    <div class="header-left">
                        <button class="menu-btn" on:click=move |_| set_drawer_open.set(true)>"☰"</button>
                        <div>
                            <h2 class="view-title">{move || store.view().get().title()}</h2>
                            <p class="view-subtitle">
                                "Session: " {move || org().map(|o| o.id).unwrap_or_default()}
                            </p>
                        </div>
                    </div>
                    <div class="header-right">
                        <button
                            class="bell-btn"
                            title="Low stock alerts"
                            on:click=move |_| store_set_view(&store, ViewMode::Inventory)
                        >
                            "🔔"
                            <Show when=move || { low_stock.get() > 0 }>
                                <span class="bell-badge">{move || low_stock.get()}</span>
                            </Show>
                        </button>
                        <div class="user-menu">
                            <button class="user-btn" on:click=move |_| set_menu_open.update(|v| *v = !*v)>
                                <div class="user-meta">
                                    <p class="user-name">
                                        {move || user().map(|u| first_name(&u.name).to_string()).unwrap_or_default()}
                                    </p>
                                    <p class="user-role">{move || user().map(|u| u.role.label()).unwrap_or_default()}</p>
                                </div>
                                <div class="avatar">{move || user().map(|u| initials(&u.name)).unwrap_or_default()}</div>
                            </button>
                            <Show when=move || menu_open.get()>
                                <div class="user-dropdown">
                                    <div class="user-dropdown-head">
                                        <p class="user-email">{move || user().map(|u| u.email).unwrap_or_default()}</p>
                                        <p class="user-org">{move || org().map(|o| o.name).unwrap_or_default()}</p>
                                    </div>
                                    <button
                                        class="logout-btn"
                                        on:click=move |_| {
                                            set_menu_open.set(false);
                                            on_logout.run(());
                                        }
                                    >
                                        "End Session"
                                    </button>
                                </div>
                            </Show>
                        </div>
                    </div>
                </header>
                <section class="view-container">{children()}</section>
            </main>
        </div>
    }
}
