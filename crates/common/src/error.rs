//! Common error types and handling for Orgauth

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned in place of infrastructure failures
pub const GENERIC_CLIENT_ERROR: &str = "Client error";

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field-level failure found while validating one request.
///
/// Validators push into this collection instead of returning early so that a
/// caller can display every problem at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection holding a single failure
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether any failure was recorded for `field`
    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// All messages recorded for `field`, in insertion order
    pub fn messages_for(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was recorded, otherwise `Error::Validation`
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Common error type for the Orgauth service
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error comes from infrastructure rather than caller input
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::Unexpected(_) | Error::Database(_) | Error::Serialization(_) | Error::Internal(_)
        )
    }

    /// Get the appropriate HTTP status code for this error
    ///
    /// Infrastructure failures are reported as a generic client error (400)
    /// so that internals never leak through the status line.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Authorization(_) => StatusCode::FORBIDDEN,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::BadRequest(_)
            | Error::Unexpected(_)
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Internal(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Caller-facing message for the response envelope
    pub fn public_message(&self) -> String {
        match self {
            Error::Authentication(msg)
            | Error::Authorization(msg)
            | Error::NotFound(msg)
            | Error::Conflict(msg)
            | Error::BadRequest(msg) => msg.clone(),
            Error::Validation(_) => "Validation failed".to_string(),
            Error::Unexpected(_)
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Internal(_) => GENERIC_CLIENT_ERROR.to_string(),
        }
    }

    /// Replace an infrastructure failure with an operation-specific client error.
    ///
    /// Caller-input errors pass through untouched. The original error is logged
    /// before it is discarded.
    pub fn or_client_error(self, message: &str) -> Self {
        if self.is_internal() {
            tracing::error!(error = %self, "{}", message);
            Error::BadRequest(message.to_string())
        } else {
            self
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors with full context
        if self.is_internal() {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let body = match &self {
            Error::Validation(errors) => json!({
                "status": "error",
                "message": self.public_message(),
                "errors": errors,
            }),
            _ => json!({
                "status": "error",
                "message": self.public_message(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
