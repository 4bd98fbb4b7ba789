//! Service Wiring
//!
//! Build-time configuration, the remote client, and browser downloads.

use gemini_client::GeminiClient;
use inventory_core::config::API_KEY_VAR;
use inventory_core::{AppConfig, AppError, AppResult};
use leptos_camera::CameraError;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::JsCast;

/// Configuration baked in at compile time (`API_KEY=... trunk build`)
pub fn load_config() -> AppConfig {
    AppConfig::from_lookup(|key| {
        let value = match key {
            API_KEY_VAR => option_env!("API_KEY"),
            "INVENTORY_API_BASE" => option_env!("INVENTORY_API_BASE"),
            "INVENTORY_TEXT_MODEL" => option_env!("INVENTORY_TEXT_MODEL"),
            "INVENTORY_IMAGE_MODEL" => option_env!("INVENTORY_IMAGE_MODEL"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

pub fn build_client(config: &AppConfig) -> GeminiClient {
    if config.api_key.is_none() {
        log::warn!("{} is not set; vision and assistant calls will fail", API_KEY_VAR);
    }
    GeminiClient::new(config.clone())
}

/// `data:` URL for a CSV document
pub fn csv_data_url(csv: &str) -> String {
    format!("data:text/csv;charset=utf-8,{}", utf8_percent_encode(csv, NON_ALPHANUMERIC))
}

/// Offer `contents` as a file download via a temporary anchor
pub fn download_csv(filename: &str, csv: &str) -> AppResult<()> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| AppError::Storage("no document".into()))?;
    let anchor = document
        .create_element("a")
        .map_err(|e| AppError::Storage(format!("{:?}", e)))?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| AppError::Storage("anchor element".into()))?;
    anchor.set_href(&csv_data_url(csv));
    anchor.set_download(filename);
    anchor.click();
    log::info!("exported {}", filename);
    Ok(())
}

pub fn camera_error(e: CameraError) -> AppError {
    log::warn!("camera: {}", e);
    match e {
        CameraError::PermissionDenied => AppError::PermissionDenied,
        CameraError::HardwareUnavailable(msg) => AppError::HardwareUnavailable(msg),
        CameraError::NotReady => AppError::HardwareUnavailable("video frame not ready".into()),
        CameraError::Read(msg) => AppError::InvalidInput(msg),
    }
}

/// Move keyboard focus to the element with `id`
pub fn focus_element(id: &str) {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());
    if let Some(element) = element {
        let _ = element.focus();
    }
}

/// Browser confirm dialog; `false` when unavailable
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_errors_map_to_app_errors() {
        assert_eq!(camera_error(CameraError::PermissionDenied), AppError::PermissionDenied);
        assert!(matches!(camera_error(CameraError::NotReady), AppError::HardwareUnavailable(_)));
    }

    #[test]
    fn test_csv_data_url_escapes_newlines_and_commas() {
        let url = csv_data_url("Name,Stock\nChair,3\n");
        assert_eq!(url, "data:text/csv;charset=utf-8,Name%2CStock%0AChair%2C3%0A");
    }
}
