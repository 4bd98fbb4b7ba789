//! Chat Panel Component
//!
//! Operations assistant grounded in the current inventory. Replies stream
//! in chunk by chunk and render as markdown.

use chrono::Utc;
use leptos::prelude::*;
use leptos::task::spawn_local;

use inventory_core::chat::{greeting, Transcript};
use inventory_core::domain::ChatRole;

use crate::context::use_app_context;
use crate::markdown::parse_markdown;
use crate::store::{use_app_store, AppStateStoreFields};

const COMMAND_HINTS: [(&str, &str); 4] = [
    ("Stock Audit", "Run a critical stock audit and suggest reorder priorities."),
    ("Value Summary", "Summarize total inventory valuation by category."),
    ("Optimization", "Identify the top 3 items to relocate for better efficiency."),
    ("Low Stock", "Show me all items currently in critical status."),
];

#[component]
pub fn ChatPanel() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let opening = store.items().with_untracked(|items| greeting(items));
    let transcript = RwSignal::new(Transcript::new(opening, Utc::now()));
    let (input, set_input) = signal(String::new());
    let scroll_ref = NodeRef::<leptos::html::Div>::new();

    // Keep the newest message in view while text streams in
    Effect::new(move |_| {
        transcript.track();
        if let Some(el) = scroll_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = move || {
        let text = input.get_untracked();
        let turn = store.items().with_untracked(|items| {
            transcript
                .try_update(|t| t.begin_turn(&text, items, Utc::now()))
                .flatten()
        });
        let Some(turn) = turn else {
            return;
        };
        set_input.set(String::new());
        let chat = ctx.chat();
        spawn_local(async move {
            let outcome = chat
                .stream_reply(&turn, &mut |chunk| {
                    transcript.try_update(|t| t.push_chunk(chunk));
                })
                .await;
            match outcome {
                Ok(()) => {
                    transcript.try_update(|t| t.finish());
                }
                Err(e) => {
                    log::error!("assistant reply failed: {}", e);
                    transcript.try_update(|t| t.fail(Utc::now()));
                }
            }
        });
    };

    let can_send = move || !transcript.with(|t| t.is_pending()) && !input.with(|i| i.trim().is_empty());

    let hints = COMMAND_HINTS
        .iter()
        .map(|&(label, command)| {
            view! {
                <button type="button" class="command-hint" on:click=move |_| set_input.set(command.to_string())>
                    {label}
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="chat-panel">
            <div class="chat-header">
                <div>
                    <h3>"Neural Intelligence Console"</h3>
                    <p class="chat-subtitle">"Operational Assistant"</p>
                </div>
                <span class="chat-badge">
                    {move || format!("{} SKUs analyzed", store.items().with(|items| items.len()))}
                </span>
            </div>

            <div class="chat-messages" node_ref=scroll_ref>
                {move || {
                    transcript.with(|t| {
                        t.messages()
                            .iter()
                            .filter(|m| !m.text.is_empty())
                            .map(|m| {
                                let (row, bubble) = match m.role {
                                    ChatRole::User => ("chat-row user", "chat-bubble user"),
                                    ChatRole::Model => ("chat-row model", "chat-bubble model"),
                                };
                                let html = parse_markdown(&m.text);
                                let time = m.timestamp.with_timezone(&chrono::Local).format("%H:%M").to_string();
                                view! {
                                    <div class=row>
                                        <div class=bubble inner_html=html></div>
                                        <span class="chat-time">{time}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    })
                }}
                <Show when=move || transcript.with(|t| t.awaiting_first_chunk())>
                    <div class="chat-row model">
                        <div class="chat-bubble model typing">
                            <span class="typing-dots"><span></span><span></span><span></span></span>
                            "Querying Repository..."
                        </div>
                    </div>
                </Show>
            </div>

            <div class="chat-input-area">
                <div class="command-hints">{hints}</div>
                <div class="chat-input-row">
                    <input
                        type="text"
                        class="chat-input"
                        autofocus
                        placeholder="Command input (e.g. 'Analyze Q3 stock trends')..."
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                send();
                            }
                        }
                    />
                    <button
                        type="button"
                        class="send-btn"
                        disabled=move || !can_send()
                        on:click=move |_| send()
                    >
                        "➤"
                    </button>
                </div>
            </div>
        </div>
    }
}
