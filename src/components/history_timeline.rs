//! History Timeline Component

use leptos::prelude::*;

use inventory_core::domain::{HistoryEntry, HistoryKind};

/// Audit log of one item, newest first
#[component]
pub fn HistoryTimeline(entries: Vec<HistoryEntry>) -> impl IntoView {
    if entries.is_empty() {
        return view! { <p class="empty-state">"No history available for this node."</p> }.into_any();
    }
    let rows = entries
        .into_iter()
        .rev()
        .map(|entry| {
            let marker = match entry.kind {
                HistoryKind::Creation => "timeline-dot creation",
                HistoryKind::StockAdjustment => "timeline-dot stock",
                HistoryKind::LocationChange => "timeline-dot location",
                HistoryKind::ConfigUpdate => "timeline-dot config",
            };
            view! {
                <li class="timeline-entry">
                    <span class=marker></span>
                    <div class="timeline-body">
                        <p class="timeline-kind">{entry.kind.label()}</p>
                        <p class="timeline-details">{entry.details}</p>
                        <p class="timeline-meta">
                            {entry.user} " · " {entry.timestamp.format("%Y-%m-%d %H:%M").to_string()}
                        </p>
                    </div>
                </li>
            }
        })
        .collect_view();
    view! { <ul class="timeline">{rows}</ul> }.into_any()
}
