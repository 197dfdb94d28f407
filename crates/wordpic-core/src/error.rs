//! Error types module
//!
//! All failures surface through the `AppError` enum. Each variant knows its
//! HTTP status code, its client-facing message, and the level it should be
//! logged at. Infrastructure failures (storage, record store, transform
//! internals) deliberately map to opaque client messages so backend detail
//! never leaks into responses.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected, user-correctable errors
    Debug,
    /// Recoverable or payload-level issues
    Warn,
    /// Unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Image transform failed: {0}")]
    Transform(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Record store error: {0}")]
    Record(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Error type name for structured logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "Validation",
            AppError::Transform(_) => "Transform",
            AppError::Storage(_) => "Storage",
            AppError::Record(_) => "Record",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Internal(_) => "Internal",
        }
    }

    /// HTTP status code for this error.
    ///
    /// Upload-pipeline failures (validation, transform, storage, record)
    /// all answer 500: that is this service's public contract.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::PayloadTooLarge(_) => 413,
            AppError::Validation(_)
            | AppError::Transform(_)
            | AppError::Storage(_)
            | AppError::Record(_)
            | AppError::Internal(_) => 500,
        }
    }

    /// Client-facing message (may differ from the internal error message)
    pub fn client_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::PayloadTooLarge(msg) => msg.clone(),
            AppError::Transform(_) => "Failed to process image".to_string(),
            AppError::Storage(_) => "Failed to store file".to_string(),
            AppError::Record(_) => "Failed to write record".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Log level for this error
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::Validation(_) | AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::PayloadTooLarge(_) | AppError::Transform(_) => LogLevel::Warn,
            AppError::Storage(_) | AppError::Record(_) | AppError::Internal(_) => LogLevel::Error,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
