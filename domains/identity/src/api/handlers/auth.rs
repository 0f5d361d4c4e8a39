//! Registration and login API handlers
//!
//! Implements:
//! - POST /auth/register - Create a user and their default organisation
//! - POST /auth/login - Exchange credentials for a bearer token

use axum::extract::State;
use orgauth_common::{ApiJson, ApiResponse, ApiResult};
use serde::Serialize;

use super::users::UserResponse;
use crate::api::middleware::IdentityState;
use crate::service::AuthenticatedUser;
use crate::{LoginRequest, RegistrationRequest};

/// Token plus the user it was issued for
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub user: UserResponse,
}

impl From<AuthenticatedUser> for AuthResponse {
    fn from(authenticated: AuthenticatedUser) -> Self {
        Self {
            access_token: authenticated.access_token,
            user: UserResponse::from(authenticated.user),
        }
    }
}

/// Register a new user
///
/// **POST /auth/register**
///
/// Returns 201 with a token on success and 422 listing every invalid field.
pub async fn register(
    State(state): State<IdentityState>,
    ApiJson(request): ApiJson<RegistrationRequest>,
) -> ApiResult<AuthResponse> {
    let registered = state
        .identity
        .register(request)
        .await
        .map_err(|e| e.or_client_error("Registration unsuccessful"))?;

    Ok(ApiResponse::created(
        "Registration successful",
        AuthResponse::from(registered),
    ))
}

/// Log in with email and password
///
/// **POST /auth/login**
pub async fn login(
    State(state): State<IdentityState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> ApiResult<AuthResponse> {
    let logged_in = state
        .identity
        .login(request)
        .await
        .map_err(|e| e.or_client_error("Authentication failed"))?;

    Ok(ApiResponse::ok("Login successful", AuthResponse::from(logged_in)))
}
