//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    InvalidUserId,
    UserNotFound,
    UserLoadError,
    TokenCreationFailed,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthorization
            | AuthError::InvalidAuthorizationFormat
            | AuthError::InvalidToken
            | AuthError::InvalidUserId
            | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
            AuthError::UserLoadError | AuthError::TokenCreationFailed => StatusCode::BAD_REQUEST,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            AuthError::MissingAuthorization => "Authorization header required",
            AuthError::InvalidAuthorizationFormat => "Invalid authorization header format",
            AuthError::InvalidToken => "Invalid or expired token",
            AuthError::InvalidUserId => "Invalid user ID in token",
            AuthError::UserNotFound => "User not found",
            AuthError::UserLoadError => "Authentication failed",
            AuthError::TokenCreationFailed => "Client error",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for AuthError {}

impl From<AuthError> for orgauth_common::Error {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserLoadError | AuthError::TokenCreationFailed => {
                orgauth_common::Error::Internal(err.to_string())
            }
            other => orgauth_common::Error::Authentication(other.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "status": "error",
            "message": self.message(),
        }));

        (self.status_code(), body).into_response()
    }
}
