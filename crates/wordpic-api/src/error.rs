//! HTTP error response conversion
//!
//! This module provides HTTP-specific error response conversion for
//! AppError. Handlers return `Result<impl IntoResponse, HttpAppError>`;
//! domain errors convert into `HttpAppError` via `From` so every failure
//! renders the same `{error}` body and is logged exactly once at its
//! variant's level.

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use wordpic_core::{AppError, LogLevel};
use wordpic_processing::{TransformError, ValidationError};
use wordpic_records::RecordError;
use wordpic_storage::StorageError;

/// Error payload returned on every failure path.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from wordpic-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

/// Convert JSON body deserialization failures into a 400 with our
/// ErrorResponse format.
impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that returns our ErrorResponse format (400 + JSON)
/// on deserialization failure, instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
        });

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for
// local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::Storage(err.to_string()))
    }
}

impl From<TransformError> for HttpAppError {
    fn from(err: TransformError) -> Self {
        HttpAppError(AppError::Transform(err.to_string()))
    }
}

impl From<RecordError> for HttpAppError {
    fn from(err: RecordError) -> Self {
        HttpAppError(AppError::Record(err.to_string()))
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        HttpAppError(validation_to_app(err))
    }
}

/// Map a validation failure onto the error taxonomy. Size violations get
/// their own statuses; everything else is a validation rejection surfaced
/// verbatim.
pub(crate) fn validation_to_app(err: ValidationError) -> AppError {
    match err {
        ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
        ValidationError::EmptyFile => AppError::InvalidInput(err.to_string()),
        other => AppError::Validation(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_storage_error() {
        let HttpAppError(app_err) = StorageError::UploadFailed("timeout".to_string()).into();
        match app_err {
            AppError::Storage(msg) => assert!(msg.contains("timeout")),
            _ => panic!("Expected Storage variant"),
        }
    }

    #[test]
    fn test_from_transform_error() {
        let HttpAppError(app_err) = TransformError::Decode("bad magic".to_string()).into();
        assert!(matches!(app_err, AppError::Transform(_)));
        assert_eq!(app_err.client_message(), "Failed to process image");
    }

    #[test]
    fn test_from_record_error() {
        let HttpAppError(app_err) = RecordError::WriteFailed("denied".to_string()).into();
        assert!(matches!(app_err, AppError::Record(_)));
        assert_eq!(app_err.http_status_code(), 500);
    }

    #[test]
    fn test_validation_rejection_surfaces_reason() {
        let app_err = validation_to_app(ValidationError::InvalidContentType(
            "text/plain".to_string(),
        ));
        match &app_err {
            AppError::Validation(msg) => assert!(msg.contains("Images only!")),
            _ => panic!("Expected Validation variant"),
        }
        assert_eq!(app_err.http_status_code(), 500);
    }

    #[test]
    fn test_validation_size_maps_to_payload_too_large() {
        let app_err = validation_to_app(ValidationError::FileTooLarge {
            size: 100,
            max: 10,
        });
        assert_eq!(app_err.http_status_code(), 413);
    }

    /// Public error contract: the serialized body is `{"error": "..."}`.
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Images only!".to_string(),
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json.get("error").and_then(|v| v.as_str()),
            Some("Images only!")
        );
        assert_eq!(json.as_object().map(|o| o.len()), Some(1));
    }
}
