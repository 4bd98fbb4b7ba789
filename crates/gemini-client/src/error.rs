//! Service Errors

use inventory_core::AppError;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("API key is not configured")]
    MissingApiKey,
    #[error("Request failed: {message}")]
    Http { message: String },
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("Unreadable response: {message}")]
    Decode { message: String },
    #[error("Empty response")]
    EmptyResponse,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl ServiceError {
    /// Build from a non-success HTTP status and its body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.chars().take(200).collect());
        ServiceError::Api { status, message }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        ServiceError::Http { message: e.to_string() }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Decode { .. } | ServiceError::EmptyResponse => AppError::RecognitionFailed(e.to_string()),
            other => AppError::Service(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_extracted() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        let err = ServiceError::from_status(403, body);
        assert_eq!(err.to_string(), "API error 403: API key not valid");
        assert!(matches!(AppError::from(err), AppError::Service(_)));
    }

    #[test]
    fn test_empty_response_is_recognition_failure() {
        assert!(matches!(AppError::from(ServiceError::EmptyResponse), AppError::RecognitionFailed(_)));
    }
}
