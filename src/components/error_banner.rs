//! Error Banner Component
//!
//! Inline error with the recovery paths the error allows.

use leptos::prelude::*;

use inventory_core::AppError;

fn quick_fix(error: &AppError) -> Option<&'static str> {
    match error {
        AppError::PermissionDenied => Some("Reset camera permissions in browser settings."),
        AppError::HardwareUnavailable(_) => Some("Ensure no other app is using the camera."),
        AppError::RecognitionFailed(_) => Some("Steady the lens or enter data manually."),
        _ => None,
    }
}

#[component]
pub fn ErrorBanner(
    error: AppError,
    #[prop(optional, into)] on_retry: Option<Callback<()>>,
    #[prop(optional, into)] retry_label: Option<String>,
    #[prop(optional, into)] on_manual: Option<Callback<()>>,
) -> impl IntoView {
    let retry = on_retry.filter(|_| error.is_retryable() || error == AppError::PermissionDenied);
    let retry_label = retry_label.unwrap_or_else(|| "Retry".to_string());

    view! {
        <div class="error-banner">
            <p class="error-title">{error.title()}</p>
            <p class="error-message">{error.to_string()}</p>
            {quick_fix(&error).map(|hint| view! { <p class="error-hint">"Quick Fix: " {hint}</p> })}
            <div class="error-actions">
                {retry.map(|cb| view! {
                    <button type="button" class="secondary-btn" on:click=move |_| cb.run(())>{retry_label}</button>
                })}
                {on_manual.map(|cb| view! {
                    <button type="button" class="link-btn" on:click=move |_| cb.run(())>"Manual Entry"</button>
                })}
            </div>
        </div>
    }
}
