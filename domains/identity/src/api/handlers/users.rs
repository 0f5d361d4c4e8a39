//! User lookup API handler
//!
//! Implements:
//! - GET /api/users/{id} - Fetch a user the caller shares an organisation with

use axum::extract::{Path, State};
use orgauth_common::{ApiResponse, ApiResult};
use serde::Serialize;
use uuid::Uuid;

use super::parse_path_id;
use crate::api::middleware::{AuthUser, IdentityState};
use crate::service::USER_NOT_FOUND;
use crate::User;

/// Public view of a user record
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Get a user by id
///
/// **GET /api/users/{id}**
///
/// Callers may always view themselves. Anyone else must share at least one
/// organisation with the caller (403 otherwise); unknown ids are 404.
pub async fn get_user(
    AuthUser(auth_context): AuthUser,
    State(state): State<IdentityState>,
    Path(id): Path<String>,
) -> ApiResult<UserResponse> {
    let target = parse_path_id(&id, USER_NOT_FOUND)?;

    let user = state
        .membership
        .get_user(auth_context.user_id(), target)
        .await?;

    Ok(ApiResponse::ok("User found", UserResponse::from(user)))
}
