//! Scanner Component
//!
//! Live camera preview with periodic object detection ("smart sight"),
//! single-frame item analysis, and the hand-off from a recognized object
//! to the item editor.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_camera::{base64_payload, read_file_as_data_url, CameraController, FrameOptions, StreamRequest};
use wasm_bindgen::JsCast;

use inventory_core::capture::{CaptureState, CaptureWorkflow};
use inventory_core::domain::{DetectedObject, InventoryItem, ItemAnalysis, ItemDraft};
use inventory_core::matching::{resolve, similar_items, Recognition};
use inventory_core::service::{analyze_frame, detect_or_empty};
use inventory_core::AppError;

use crate::components::ErrorBanner;
use crate::context::use_app_context;
use crate::services;
use crate::store::{store_open_editor, use_app_store, AppStateStoreFields};

#[component]
pub fn Scanner() -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let detection_interval_ms = ctx.config().detection_interval_ms;

    let workflow = RwSignal::new(CaptureWorkflow::<ItemAnalysis>::new());
    // Data URL of the frozen frame, for display and the draft thumbnail
    let snapshot = RwSignal::new(None::<String>);
    let video_ref = NodeRef::<leptos::html::Video>::new();
    let camera = CameraController::new(video_ref, StreamRequest::SCANNER);
    let file_input = NodeRef::<leptos::html::Input>::new();

    let (smart_sight, set_smart_sight) = signal(false);
    let (detecting, set_detecting) = signal(false);
    let (objects, set_objects) = signal(Vec::<DetectedObject>::new());
    let ticker = StoredValue::new_local(None::<Interval>);
    on_cleanup(move || {
        ticker.try_update_value(|t| t.take());
    });

    let start_camera = move || {
        workflow.update(|w| w.start_preview());
        snapshot.set(None);
        spawn_local(async move {
            if let Err(e) = camera.start().await {
                let err = services::camera_error(e);
                workflow.try_update(|w| w.preview_failed(err));
            }
        });
    };

    let stop_camera = move || {
        camera.stop();
        workflow.update(|w| w.stop());
        snapshot.set(None);
        set_objects.set(Vec::new());
    };

    let detect_tick = move || {
        if detecting.get_untracked() || !camera.is_ready() || workflow.with_untracked(|w| w.is_analyzing()) {
            return;
        }
        let Ok(frame) = camera.capture(FrameOptions::DETECTION) else {
            return;
        };
        set_detecting.set(true);
        let vision = ctx.vision();
        spawn_local(async move {
            let found = detect_or_empty(vision.as_ref(), base64_payload(&frame)).await;
            set_objects.try_set(found);
            set_detecting.try_set(false);
        });
    };

    // Detection runs only while smart sight is on and the preview is live
    Effect::new(move |_| {
        let active = smart_sight.get() && camera.live().get() && workflow.with(|w| w.is_live());
        ticker.update_value(|t| {
            *t = active.then(|| Interval::new(detection_interval_ms, detect_tick));
        });
        if !active {
            set_objects.set(Vec::new());
        }
    });

    // The editor owns the screen once an item is opened. Stopping also
    // cancels a camera that is still being acquired.
    Effect::new(move |_| {
        if store.editing().with(|e| e.is_some()) {
            camera.stop();
            if workflow.with_untracked(|w| w.is_live()) {
                stop_camera();
            }
        }
    });

    let analyze = move |data_url: String| {
        let payload = base64_payload(&data_url).to_string();
        let ticket = workflow
            .try_update(|w| w.capture(payload.clone()).and_then(|_| w.begin_analysis()))
            .and_then(Result::ok);
        let Some(ticket) = ticket else {
            log::warn!("capture ignored while analysis is running");
            return;
        };
        snapshot.set(Some(data_url));
        set_objects.set(Vec::new());
        let vision = ctx.vision();
        spawn_local(async move {
            let outcome = analyze_frame(vision.as_ref(), &payload).await;
            if let Ok(analysis) = &outcome {
                log::info!("recognized {} ({}%)", analysis.object_name, analysis.confidence_pct());
            }
            let applied = workflow.try_update(|w| w.complete(ticket, outcome)).unwrap_or(false);
            if !applied {
                log::debug!("discarded stale analysis {}", ticket);
            }
        });
    };

    let capture = move || match camera.capture(FrameOptions::ANALYSIS) {
        Ok(frame) => {
            camera.stop();
            analyze(frame);
        }
        Err(e) => {
            camera.stop();
            let err = services::camera_error(e);
            workflow.update(|w| w.preview_failed(err));
        }
    };

    let on_file = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        camera.stop();
        spawn_local(async move {
            match read_file_as_data_url(file).await {
                Ok(data_url) => analyze(data_url),
                Err(e) => {
                    let err = services::camera_error(e);
                    workflow.try_update(|w| w.preview_failed(err));
                }
            }
        });
    };

    let open_upload = move || {
        if let Some(input) = file_input.get_untracked() {
            input.click();
        }
    };

    let provision = move || {
        let Some(analysis) = workflow.with_untracked(|w| w.result().cloned()) else {
            return;
        };
        let recognition = store.items().with_untracked(|items| resolve(&analysis, items));
        let draft = match recognition {
            Recognition::Existing(item) => {
                log::info!("matched existing item {}", item.id);
                ItemDraft::from_item(&item)
            }
            Recognition::New(mut draft) => {
                draft.image_url = snapshot.get_untracked();
                draft
            }
        };
        store_open_editor(&store, draft);
    };

    let open_existing = move |item: InventoryItem| {
        store_open_editor(&store, ItemDraft::from_item(&item));
    };

    let retry = move || {
        if workflow.try_update(|w| w.retry()).is_some_and(|r| r.is_ok()) {
            start_camera();
        }
    };

    let manual_entry = move || {
        camera.stop();
        workflow.update(|w| {
            let _ = w.manual_entry();
        });
        store_open_editor(&store, ItemDraft::blank());
    };

    let is_live = move || workflow.with(|w| w.is_live());
    let is_idle = move || workflow.with(|w| matches!(w.state(), CaptureState::Idle));
    let error = move || workflow.with(|w| w.error().cloned());

    let similar = Memo::new(move |_| {
        workflow.with(|w| {
            w.result()
                .map(|analysis| {
                    store
                        .items()
                        .with(|items| similar_items(analysis, items).into_iter().cloned().collect::<Vec<_>>())
                })
                .unwrap_or_default()
        })
    });

    view! {
        <div class="scanner">
            <div class="scanner-main">
                <div class="scanner-stage">
                    <video
                        node_ref=video_ref
                        autoplay
                        playsinline
                        muted
                        class=move || if is_live() { "scanner-video" } else { "scanner-video hidden" }
                    ></video>

                    <Show when=is_idle>
                        <div class="scanner-idle">
                            <h3>"Enterprise Vision Core"</h3>
                            <p>"Map assets in real-time with Neural Object Recognition."</p>
                            <div class="scanner-idle-actions">
                                <button type="button" class="primary-btn" on:click=move |_| start_camera()>
                                    "Initialize Sensor"
                                </button>
                                <button type="button" class="secondary-btn" on:click=move |_| open_upload()>
                                    "Static File"
                                </button>
                            </div>
                        </div>
                    </Show>

                    {move || error().map(|err| {
                        let title = match err {
                            AppError::PermissionDenied => Some("Vision sensor offline. Camera permissions required."),
                            AppError::HardwareUnavailable(_) => Some("Sensor hardware sync failure"),
                            _ => None,
                        };
                        view! {
                            <div class="scanner-error">
                                {title.map(|t| view! { <p class="scanner-error-title">{t}</p> })}
                                <ErrorBanner
                                    error=err
                                    on_retry=Callback::new(move |_| retry())
                                    on_manual=Callback::new(move |_| manual_entry())
                                />
                            </div>
                        }
                    })}

                    <Show when=is_live>
                        <div class="hud">
                            <div class="hud-top">
                                <span class="hud-badge"><span class="pulse-dot"></span>"Vision Active"</span>
                                <span class="hud-meta">"Neural Stream"</span>
                            </div>
                            <For
                                each=move || objects.get().into_iter().enumerate()
                                key=|(i, obj)| format!("{}-{}", i, obj.label)
                                let:entry
                            >
                                {
                                    let (_, obj) = entry;
                                    let b = obj.bounding_box();
                                    let style = format!(
                                        "top: {:.1}%; left: {:.1}%; width: {:.1}%; height: {:.1}%",
                                        b.top, b.left, b.width, b.height,
                                    );
                                    view! {
                                        <div class="detection-box" style=style>
                                            <span class="detection-label">
                                                {format!("{} • {}%", obj.label, (obj.confidence * 100.0).round() as u32)}
                                            </span>
                                        </div>
                                    }
                                }
                            </For>
                            <div class="reticle"><div class="scanner-line"></div></div>
                        </div>
                        <div class="scanner-controls">
                            <button
                                type="button"
                                class=move || if smart_sight.get() { "round-btn active" } else { "round-btn" }
                                title="Smart sight"
                                on:click=move |_| set_smart_sight.update(|on| *on = !*on)
                            >
                                {move || if detecting.get() { "…" } else if smart_sight.get() { "👁" } else { "◌" }}
                            </button>
                            <button type="button" class="shutter-btn" title="Capture" on:click=move |_| capture()>
                                "⚡"
                            </button>
                            <button type="button" class="round-btn" title="Stop" on:click=move |_| stop_camera()>
                                "✕"
                            </button>
                        </div>
                    </Show>

                    {move || snapshot.get().filter(|_| !is_live()).map(|src| view! {
                        <div class="scanner-snapshot">
                            <img src=src alt="Captured" />
                            <Show when=move || workflow.with(|w| w.is_analyzing())>
                                <div class="scan-overlay">
                                    <p>"Analyzing Node Map"</p>
                                </div>
                            </Show>
                            <button type="button" class="round-btn corner" title="Discard" on:click=move |_| stop_camera()>
                                "✕"
                            </button>
                        </div>
                    })}
                </div>

                <div class="card cross-reference">
                    <h4 class="card-title">"Intelligent Cross-Reference"</h4>
                    <Show
                        when=move || !similar.with(|s| s.is_empty())
                        fallback=|| view! { <p class="empty-state">"Zero local matches detected"</p> }
                    >
                        <div class="similar-grid">
                            <For each=move || similar.get() key=|item| item.id.clone() let:item>
                                {
                                    let low = item.is_low_stock();
                                    let badge = format!("{} units", item.stock_count);
                                    let name = item.name.clone();
                                    let sku = item.sku.clone();
                                    view! {
                                        <button type="button" class="similar-card" on:click=move |_| open_existing(item.clone())>
                                            <span class=if low { "stock-badge low" } else { "stock-badge" }>{badge}</span>
                                            <span class="similar-name">{name}</span>
                                            <span class="similar-sku">{sku}</span>
                                            <span class="similar-action">"Sync Data →"</span>
                                        </button>
                                    }
                                }
                            </For>
                        </div>
                    </Show>
                </div>
            </div>

            <div class="scanner-side">
                {move || workflow.with(|w| w.result().cloned()).map(|analysis| view! {
                    <div class="card analysis">
                        <span class="confidence-badge">{format!("Confidence: {}%", analysis.confidence_pct())}</span>
                        <h4 class="analysis-name">{analysis.object_name.clone()}</h4>
                        <p class="analysis-category">{analysis.category.clone()}</p>
                        <div class="analysis-specs">
                            <p class="label">"Node Analysis"</p>
                            <p>{analysis.estimated_specs.clone()}</p>
                        </div>
                        <div class="analysis-grid">
                            <div>
                                <p class="label">"Assigned SKU"</p>
                                <p class="mono">{analysis.likely_sku.clone()}</p>
                            </div>
                            <div>
                                <p class="label">"Zone Node"</p>
                                <p>{analysis.suggested_location.clone()}</p>
                            </div>
                        </div>
                        {analysis.barcode().map(|code| view! {
                            <div class="analysis-barcode">
                                <p class="label">"Decoded Data String"</p>
                                <p class="mono">{code}</p>
                            </div>
                        })}
                        <button type="button" class="primary-btn wide" on:click=move |_| provision()>
                            "Provision Node"
                        </button>
                    </div>
                })}
                <Show when=move || workflow.with(|w| w.result().is_none())>
                    <div class="card placeholder">
                        <p>"Await Neural Input Link"</p>
                    </div>
                </Show>
            </div>

            <input node_ref=file_input type="file" accept="image/*" class="hidden" on:change=on_file />
        </div>
    }
}
