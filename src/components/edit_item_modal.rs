//! Edit Item Modal Component
//!
//! Registration / configuration form for one asset, its audit log, and a
//! close-up camera panel that reads barcodes (with an OCR fallback for
//! printed identifiers).

use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_camera::{base64_payload, CameraController, FrameOptions, StreamRequest};

use inventory_core::domain::{DraftField, ItemDraft};
use inventory_core::service::scan_code;
use inventory_core::AppError;

use crate::components::{DeleteConfirmButton, ErrorBanner, HistoryTimeline};
use crate::context::use_app_context;
use crate::services;
use crate::store::{store_remove_item, store_save_draft, use_app_store, AppStateStoreFields};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Config,
    History,
}

struct FieldLayout {
    field: DraftField,
    label: &'static str,
    placeholder: &'static str,
    numeric: bool,
    wide: bool,
}

const FIELDS: [FieldLayout; 7] = [
    FieldLayout { field: DraftField::Name, label: "Asset Identifier", placeholder: "e.g. Workstation Pro", numeric: false, wide: true },
    FieldLayout { field: DraftField::Category, label: "Vertical", placeholder: "Electronics", numeric: false, wide: false },
    FieldLayout { field: DraftField::Sku, label: "SKU Index", placeholder: "SKU-000", numeric: false, wide: false },
    FieldLayout { field: DraftField::StockCount, label: "Stock Units", placeholder: "0", numeric: true, wide: false },
    FieldLayout { field: DraftField::MinStock, label: "Safety Buffer", placeholder: "5", numeric: true, wide: false },
    FieldLayout { field: DraftField::Location, label: "Storage Node", placeholder: "Zone A-1", numeric: false, wide: false },
    FieldLayout { field: DraftField::Price, label: "Unit Value", placeholder: "0.00", numeric: true, wide: false },
];

const BARCODE_INPUT_ID: &str = "field-barcode";
const DISCARD_PROMPT: &str = "You have unsaved changes. Are you sure you want to discard them?";

#[component]
pub fn EditItemModal() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();

    let initial = store.editing().get_untracked().unwrap_or_else(ItemDraft::blank);
    let is_new = initial.is_new();
    let history = initial.history.clone();
    let draft = RwSignal::new(initial.clone());
    let (dirty, set_dirty) = signal(false);
    let (tab, set_tab) = signal(Tab::Config);

    // Barcode panel
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let camera = CameraController::new(video_ref, StreamRequest::LABEL);
    let (panel_open, set_panel_open) = signal(false);
    let (scanning, set_scanning) = signal::<Option<bool>>(None);
    let (scan_error, set_scan_error) = signal::<Option<AppError>>(None);

    let close = move || {
        camera.stop();
        store.editing().set(None);
    };
    let close_attempt = move || {
        if !dirty.get_untracked() || services::confirm(DISCARD_PROMPT) {
            close();
        }
    };

    let esc = window_event_listener(ev::keydown, move |e| {
        if e.key() == "Escape" {
            if panel_open.get_untracked() {
                camera.stop();
                set_panel_open.set(false);
            } else {
                close_attempt();
            }
        }
    });
    on_cleanup(move || esc.remove());

    let set_field = move |field: DraftField, raw: String| {
        draft.update(|d| d.set_field(field, &raw));
        set_dirty.set(true);
    };

    let open_panel = move || {
        set_scan_error.set(None);
        set_panel_open.set(true);
        spawn_local(async move {
            if let Err(e) = camera.start().await {
                set_scan_error.try_set(Some(services::camera_error(e)));
            }
        });
    };
    let close_panel = move || {
        camera.stop();
        set_panel_open.set(false);
        set_scanning.set(None);
    };
    let manual_entry = move || {
        close_panel();
        services::focus_element(BARCODE_INPUT_ID);
    };

    let capture_and_scan = move |advanced: bool| {
        let frame = match camera.capture(FrameOptions::LABEL) {
            Ok(frame) => frame,
            Err(e) => {
                set_scan_error.set(Some(services::camera_error(e)));
                return;
            }
        };
        set_scan_error.set(None);
        set_scanning.set(Some(advanced));
        let vision = ctx.vision();
        spawn_local(async move {
            let outcome = scan_code(vision.as_ref(), base64_payload(&frame), advanced).await;
            set_scanning.try_set(None);
            match outcome {
                Ok(code) => {
                    log::info!("code read: {}", code);
                    draft.try_update(|d| d.set_field(DraftField::Barcode, &code));
                    set_dirty.try_set(true);
                    camera.stop();
                    set_panel_open.try_set(false);
                }
                Err(e) => {
                    set_scan_error.try_set(Some(e));
                }
            }
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        camera.stop();
        store_save_draft(&store, draft.get_untracked());
    };

    let delete_id = initial.id.clone();
    let on_delete = Callback::new(move |_| {
        if let Some(id) = delete_id.as_deref() {
            camera.stop();
            store_remove_item(&store, id);
        }
    });

    let fields = FIELDS
        .iter()
        .map(|layout| {
            let field = layout.field;
            view! {
                <div class=if layout.wide { "form-field wide" } else { "form-field" }>
                    <label>{layout.label}</label>
                    <input
                        type=if layout.numeric { "number" } else { "text" }
                        min=layout.numeric.then_some("0")
                        step=(field == DraftField::Price).then_some("0.01")
                        placeholder=layout.placeholder
                        autofocus=field == DraftField::Name
                        prop:value=move || draft.with(|d| d.field(field))
                        on:input=move |ev| set_field(field, event_target_value(&ev))
                    />
                </div>
            }
        })
        .collect_view();

    view! {
        <div
            class="modal-backdrop"
            on:click=move |ev| {
                if ev.target() == ev.current_target() {
                    close_attempt();
                }
            }
        >
            <div class="modal">
                <div class="modal-header">
                    <div>
                        <h3>{if is_new { "Asset Registration" } else { "Asset Configuration" }}</h3>
                        <p class="modal-subtitle">
                            "Repository Node " {initial.id.clone().unwrap_or_else(|| "New".to_string())}
                        </p>
                    </div>
                    <button type="button" class="icon-btn" on:click=move |_| close_attempt()>"✕"</button>
                </div>

                <div class="modal-tabs">
                    <button
                        type="button"
                        class=move || if tab.get() == Tab::Config { "tab active" } else { "tab" }
                        on:click=move |_| set_tab.set(Tab::Config)
                    >
                        "Configuration"
                    </button>
                    <Show when=move || !is_new>
                        <button
                            type="button"
                            class=move || if tab.get() == Tab::History { "tab active" } else { "tab" }
                            on:click=move |_| set_tab.set(Tab::History)
                        >
                            "Log History"
                        </button>
                    </Show>
                </div>

                <div class="modal-body">
                    <form
                        id="asset-form"
                        class="asset-form"
                        style=move || if tab.get() == Tab::Config { "" } else { "display: none" }
                        on:submit=submit
                    >
                        <div class="form-field wide">
                            <label>"Inventory Tag / Barcode"</label>
                            <div class="input-with-action">
                                <input
                                    id=BARCODE_INPUT_ID
                                    type="text"
                                    prop:value=move || draft.with(|d| d.barcode.clone())
                                    on:input=move |ev| set_field(DraftField::Barcode, event_target_value(&ev))
                                />
                                <button type="button" class="icon-btn dark" title="Scan code" on:click=move |_| open_panel()>
                                    "📷"
                                </button>
                            </div>
                        </div>
                        {fields}
                    </form>
                    <Show when=move || tab.get() == Tab::History>
                        <HistoryTimeline entries=history.clone() />
                    </Show>
                </div>

                <div class="modal-footer">
                    <Show
                        when=move || tab.get() == Tab::Config
                        fallback=move || view! {
                            <button type="button" class="secondary-btn grow" on:click=move |_| set_tab.set(Tab::Config)>
                                "Back to Config"
                            </button>
                        }
                    >
                        <button form="asset-form" type="submit" class="primary-btn grow">"Commit Changes"</button>
                    </Show>
                    <Show when=move || !is_new>
                        <DeleteConfirmButton button_class="danger-btn" label="🗑" on_confirm=on_delete />
                    </Show>
                </div>
            </div>

            <div
                class="code-scanner"
                style=move || if panel_open.get() { "" } else { "display: none" }
                on:click=move |ev| {
                    if ev.target() == ev.current_target() {
                        close_panel();
                    }
                }
            >
                <div class=move || if scanning.get() == Some(true) { "reticle-frame ocr" } else { "reticle-frame" }>
                    <video node_ref=video_ref autoplay playsinline muted class="code-video"></video>
                    <div class="reticle"><div class="scanner-line"></div></div>
                    {move || scanning.get().map(|advanced| view! {
                        <div class="scan-overlay">
                            <p>{if advanced { "Analyzing Patterns..." } else { "Synchronizing Vision..." }}</p>
                        </div>
                    })}
                    {move || scan_error.get().filter(|_| scanning.get().is_none()).map(|error| {
                        let recognition_failed = matches!(error, AppError::RecognitionFailed(_));
                        view! {
                            <div class="scan-error">
                                <ErrorBanner
                                    error=error
                                    retry_label="Retry Connection"
                                    on_retry=Callback::new(move |_| open_panel())
                                    on_manual=Callback::new(move |_| manual_entry())
                                />
                                <Show when=move || recognition_failed>
                                    <button type="button" class="primary-btn" on:click=move |_| capture_and_scan(true)>
                                        "Try Advanced Scan"
                                    </button>
                                </Show>
                            </div>
                        }
                    })}
                </div>
                <div class="code-scanner-controls">
                    <button type="button" class="round-btn" title="Close" on:click=move |_| close_panel()>"✕"</button>
                    <Show when=move || scan_error.get().is_none() && scanning.get().is_none()>
                        <button type="button" class="shutter-btn" title="Scan" on:click=move |_| capture_and_scan(false)>
                            "◉"
                        </button>
                    </Show>
                    <button type="button" class="round-btn" title="Manual Input" on:click=move |_| manual_entry()>
                        "⌨"
                    </button>
                </div>
                <p class="code-scanner-hint">"Center code in reticle for auto-sync"</p>
            </div>
        </div>
    }
}
