//! Application Errors
//!
//! Every failure the UI can surface. None of them is fatal: each one is
//! shown inline where it happened, with a retry or manual-entry path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Common result type for core operations
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum AppError {
    /// The user (or browser policy) refused camera access
    #[error("Camera access was denied")]
    PermissionDenied,
    /// No camera, or the device is busy
    #[error("Camera hardware unavailable: {0}")]
    HardwareUnavailable(String),
    /// The remote service answered but gave nothing usable
    #[error("Recognition failed: {0}")]
    RecognitionFailed(String),
    /// Network or remote failure
    #[error("Service error: {0}")]
    Service(String),
    /// A stored snapshot could not be parsed
    #[error("Stored data is corrupted: {0}")]
    StorageCorruption(String),
    /// Writing to local storage failed (quota, private mode)
    #[error("Storage write failed: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Whether the UI should offer "retry" for this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::HardwareUnavailable(_) | AppError::RecognitionFailed(_) | AppError::Service(_)
        )
    }

    /// Short label used by inline error banners.
    pub fn title(&self) -> &'static str {
        match self {
            AppError::PermissionDenied => "Access Denied",
            AppError::HardwareUnavailable(_) => "Hardware Unavailable",
            AppError::RecognitionFailed(_) => "No Result",
            AppError::Service(_) => "Service Error",
            AppError::StorageCorruption(_) => "Storage Corrupted",
            AppError::Storage(_) => "Storage Error",
            AppError::InvalidInput(_) => "Invalid Input",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::StorageCorruption(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(AppError::Service("offline".into()).is_retryable());
        assert!(AppError::RecognitionFailed("blank".into()).is_retryable());
        assert!(!AppError::PermissionDenied.is_retryable());
        assert!(!AppError::StorageCorruption("bad".into()).is_retryable());
    }

    #[test]
    fn test_json_error_is_corruption() {
        let err: AppError = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err().into();
        assert!(matches!(err, AppError::StorageCorruption(_)));
    }
}
