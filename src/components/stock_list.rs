//! Stock List Component
//!
//! Searchable, category-filtered catalog table with CSV export.

use chrono::Local;
use leptos::prelude::*;

use inventory_core::aggregate::format_money;
use inventory_core::catalog::{self, CatalogFilter, ALL_CATEGORIES};
use inventory_core::domain::{InventoryItem, ItemDraft};

use crate::services;
use crate::store::{store_open_editor, store_remove_item, use_app_store, AppStateStoreFields};
use crate::components::DeleteConfirmButton;

#[component]
pub fn StockList() -> impl IntoView {
    let store = use_app_store();
    let (search, set_search) = signal(String::new());
    let (category, set_category) = signal(ALL_CATEGORIES.to_string());
    let (export_error, set_export_error) = signal::<Option<String>>(None);

    let filter = Memo::new(move |_| CatalogFilter::new(search.get(), Some(category.get())));
    let categories = Memo::new(move |_| store.items().with(|items| catalog::categories(items)));
    let filtered = Memo::new(move |_| {
        let filter = filter.get();
        store
            .items()
            .with(|items| filter.apply(items).into_iter().cloned().collect::<Vec<InventoryItem>>())
    });

    let export = move |_| {
        let result = filtered.with_untracked(|items| catalog::export_csv(items.iter())).and_then(|csv| {
            let name = catalog::export_filename(Local::now().date_naive());
            services::download_csv(&name, &csv)
        });
        match result {
            Ok(()) => set_export_error.set(None),
            Err(e) => {
                log::error!("export failed: {}", e);
                set_export_error.set(Some(e.to_string()));
            }
        }
    };

    let rows = move || {
        filtered
            .get()
            .into_iter()
            .map(|item| {
                let low = item.is_low_stock();
                let id = item.id.clone();
                let draft = ItemDraft::from_item(&item);
                view! {
                    <tr class=if low { "stock-row low" } else { "stock-row" }>
                        <td>
                            <p class="asset-name">{item.name.clone()}</p>
                            <p class="asset-sku">{item.sku.clone()}</p>
                        </td>
                        <td><span class="chip">{item.category.clone()}</span></td>
                        <td>
                            <span class=if low { "stock-count critical" } else { "stock-count" }>{item.stock_count}</span>
                            <span class="stock-min">" / min " {item.min_stock}</span>
                        </td>
                        <td>{item.location.clone()}</td>
                        <td>{format!("${}", format_money(item.price))}</td>
                        <td class="row-actions">
                            <button class="edit-btn" on:click=move |_| store_open_editor(&store, draft.clone())>"Edit"</button>
                            <DeleteConfirmButton
                                button_class="delete-btn"
                                on_confirm=Callback::new(move |_| store_remove_item(&store, &id))
                            />
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="stock-list">
            <div class="stock-toolbar">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search enterprise assets..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <div class="category-filters">
                    <For
                        each=move || categories.get()
                        key=|c| c.clone()
                        children=move |c| {
                            let value = c.clone();
                            let active = c.clone();
                            view! {
                                <button
                                    class=move || if category.get() == active { "filter-btn active" } else { "filter-btn" }
                                    on:click=move |_| set_category.set(value.clone())
                                >
                                    {c}
                                </button>
                            }
                        }
                    />
                </div>
                <button class="secondary-btn" on:click=export>"Export CSV"</button>
                <button class="primary-btn" on:click=move |_| store_open_editor(&store, ItemDraft::blank())>
                    "New Asset"
                </button>
            </div>
            {move || export_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}

            <table class="stock-table">
                <thead>
                    <tr>
                        <th>"Asset Descriptor"</th>
                        <th>"Classification"</th>
                        <th>"In Stock"</th>
                        <th>"Storage Node"</th>
                        <th>"Unit Value"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            <Show when=move || filtered.with(Vec::is_empty)>
                <p class="empty-state">"Zero local repository matches"</p>
            </Show>
        </div>
    }
}
