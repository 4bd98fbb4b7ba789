//! Application Configuration
//!
//! One required credential plus tunables with fixed defaults.

use crate::error::{AppError, AppResult};

/// Environment key holding the inference API credential
pub const API_KEY_VAR: &str = "API_KEY";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_STORAGE_PREFIX: &str = "inventory_pro_org_v2_";
pub const DEFAULT_SAVE_DEBOUNCE_MS: u32 = 1000;
pub const DEFAULT_DETECTION_INTERVAL_MS: u32 = 3000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// `None` keeps the app usable; remote calls fail with a service error
    pub api_key: Option<String>,
    pub api_base: String,
    pub text_model: String,
    pub image_model: String,
    pub storage_prefix: String,
    pub save_debounce_ms: u32,
    pub detection_interval_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            storage_prefix: DEFAULT_STORAGE_PREFIX.to_string(),
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            detection_interval_ms: DEFAULT_DETECTION_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    /// Build from a variable lookup (process env natively, `option_env!`
    /// in the browser build). Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            api_key: get(API_KEY_VAR),
            api_base: get("INVENTORY_API_BASE").unwrap_or(defaults.api_base),
            text_model: get("INVENTORY_TEXT_MODEL").unwrap_or(defaults.text_model),
            image_model: get("INVENTORY_IMAGE_MODEL").unwrap_or(defaults.image_model),
            storage_prefix: defaults.storage_prefix,
            save_debounce_ms: defaults.save_debounce_ms,
            detection_interval_ms: defaults.detection_interval_ms,
        }
    }

    /// The credential, or the service error every remote call reports
    pub fn require_api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Service(format!("{} is not configured", API_KEY_VAR)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [("API_KEY", " secret "), ("INVENTORY_TEXT_MODEL", "m-1")].into();
        let cfg = AppConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.require_api_key().unwrap(), "secret");
        assert_eq!(cfg.text_model, "m-1");
        assert_eq!(cfg.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(cfg.save_debounce_ms, 1000);
    }

    #[test]
    fn test_missing_key_is_service_error() {
        let cfg = AppConfig::from_lookup(|_| Some("   ".to_string()));
        assert!(matches!(cfg.require_api_key(), Err(AppError::Service(_))));
    }
}
