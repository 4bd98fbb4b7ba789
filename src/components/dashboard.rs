//! Dashboard Component
//!
//! Valuation, alert count, unit totals, health score, stock distribution
//! bars, category split and the most recently touched items.

use leptos::prelude::*;

use inventory_core::aggregate::{format_money, group_thousands, recent_items, DashboardSummary, RECENT_LIMIT};
use inventory_core::domain::{InventoryItem, ItemDraft};

use crate::store::{store_open_editor, use_app_store, AppStateStoreFields};

const CATEGORY_COLORS: [&str; 4] = ["#6366f1", "#8b5cf6", "#d946ef", "#f97316"];

#[component]
fn StatCard(title: &'static str, value: Signal<String>, subtitle: &'static str, accent: &'static str) -> impl IntoView {
    view! {
        <div class=format!("stat-card {}", accent)>
            <p class="stat-title">{title}</p>
            <h3 class="stat-value">{move || value.get()}</h3>
            <p class="stat-subtitle">{subtitle}</p>
        </div>
    }
}

#[component]
pub fn Dashboard() -> impl IntoView {
    let store = use_app_store();
    let summary = Memo::new(move |_| store.items().with(|items| DashboardSummary::compute(items)));

    let open = move |item: InventoryItem| store_open_editor(&store, ItemDraft::from_item(&item));

    let stock_bars = move || {
        store.items().with(|items| {
            let max = items.iter().map(|i| i.stock_count).max().unwrap_or(0).max(1);
            items
                .iter()
                .map(|item| {
                    let height = f64::from(item.stock_count) / f64::from(max) * 100.0;
                    let class = if item.is_low_stock() { "bar low" } else { "bar" };
                    view! {
                        <div class="bar-slot" title=format!("{}: {}", item.name, item.stock_count)>
                            <div class=class style=format!("height: {:.1}%", height)></div>
                        </div>
                    }
                })
                .collect_view()
        })
    };

    let recent = move || {
        store.items().with(|items| {
            recent_items(items, RECENT_LIMIT)
                .into_iter()
                .cloned()
                .map(|item| {
                    let low = item.is_low_stock();
                    let label = format!("{} units · {}", item.stock_count, item.location);
                    let updated = item.last_updated.format("%H:%M").to_string();
                    let name = item.name.clone();
                    view! {
                        <button class="recent-item" on:click=move |_| open(item.clone())>
                            <span class=if low { "status-dot critical" } else { "status-dot" }></span>
                            <div class="recent-meta">
                                <p class="recent-name">{name}</p>
                                <p class="recent-detail">{label}</p>
                            </div>
                            <span class="recent-time">{updated}</span>
                        </button>
                    }
                })
                .collect_view()
        })
    };

    let categories = move || {
        let summary = summary.get();
        let total = summary.total_units.max(1) as f64;
        summary
            .categories
            .into_iter()
            .take(CATEGORY_COLORS.len())
            .enumerate()
            .map(|(i, c)| {
                let pct = (c.units as f64 / total * 100.0).round();
                let color = CATEGORY_COLORS[i % CATEGORY_COLORS.len()];
                view! {
                    <div class="category-row">
                        <span class="category-swatch" style=format!("background: {}", color)></span>
                        <span class="category-name">{c.name}</span>
                        <div class="category-track">
                            <div class="category-fill" style=format!("width: {}%; background: {}", pct, color)></div>
                        </div>
                        <span class="category-pct">{format!("{}%", pct)}</span>
                    </div>
                }
            })
            .collect_view()
    };

    view! {
        <div class="dashboard">
            <div class="ticker">
                <span class="ticker-item">"Operational Integrity: " {move || format!("{}%", summary.get().health_pct)}</span>
                <span class="ticker-item">"Vision Engine: Optimized"</span>
            </div>

            <div class="stats-grid">
                <StatCard
                    title="Assets Value"
                    value=Signal::derive(move || format!("${}", format_money(summary.get().total_value)))
                    subtitle="Net Repository Valuation"
                    accent="indigo"
                />
                <StatCard
                    title="Stock Alerts"
                    value=Signal::derive(move || summary.get().low_stock_count.to_string())
                    subtitle="Critical Node Intervention"
                    accent="rose"
                />
                <StatCard
                    title="Total Units"
                    value=Signal::derive(move || group_thousands(summary.get().total_units as i64))
                    subtitle="Enterprise Unit Count"
                    accent="violet"
                />
                <StatCard
                    title="Ops Health"
                    value=Signal::derive(move || format!("{}%", summary.get().health_pct))
                    subtitle="Logical Distribution Score"
                    accent="emerald"
                />
            </div>

            <div class="dashboard-grid">
                <div class="panel">
                    <h3 class="panel-title">"Stock Distribution"</h3>
                    <p class="panel-subtitle">"Cross-category unit comparative"</p>
                    <div class="bar-chart">{stock_bars}</div>
                    <div class="legend">
                        <span class="legend-item nominal">"Nominal"</span>
                        <span class="legend-item warning">"Warning"</span>
                    </div>
                </div>

                <div class="panel">
                    <h3 class="panel-title">"Node Topology"</h3>
                    <p class="panel-subtitle">"Classification split"</p>
                    <div class="category-list">{categories}</div>
                </div>

                <div class="panel wide">
                    <h3 class="panel-title">"Operational History"</h3>
                    <div class="recent-list">{recent}</div>
                </div>
            </div>
        </div>
    }
}
