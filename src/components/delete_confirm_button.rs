//! Decommission Button Component

use leptos::prelude::*;

/// Two-step removal of an asset from the catalog.
///
/// The first click arms the button and shows `prompt`; "Confirm" runs
/// `on_confirm`, "Keep" disarms. Clicks never bubble, so the button is safe
/// inside clickable rows and modal backdrops.
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] button_class: String,
    #[prop(into, default = "Delete".to_string())] label: String,
    #[prop(into, default = "Decommission asset?".to_string())] prompt: String,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let armed = RwSignal::new(false);
    let set_armed = move |ev: web_sys::MouseEvent, value: bool| {
        ev.stop_propagation();
        armed.set(value);
    };

    view! {
        <Show
            when=move || armed.get()
            fallback=move || {
                let class = button_class.clone();
                let label = label.clone();
                view! {
                    <button type="button" class=class title="Decommission" on:click=move |ev| set_armed(ev, true)>
                        {label}
                    </button>
                }
            }
        >
            <span class="delete-confirm" role="alertdialog">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button
                    type="button"
                    class="confirm-btn"
                    on:click=move |ev| {
                        set_armed(ev, false);
                        on_confirm.run(());
                    }
                >
                    "Confirm"
                </button>
                <button type="button" class="cancel-btn" on:click=move |ev| set_armed(ev, false)>
                    "Keep"
                </button>
            </span>
        </Show>
    }
}
