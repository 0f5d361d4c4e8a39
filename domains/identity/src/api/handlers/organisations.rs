//! Organisation API handlers
//!
//! Implements:
//! - GET /api/organisations - List the caller's organisations
//! - POST /api/organisations - Create an organisation owned by the caller
//! - GET /api/organisations/{org_id} - Organisation detail with members
//! - POST /api/organisations/{org_id}/users - Add a user to an organisation

use axum::extract::{Path, State};
use orgauth_common::{ApiJson, ApiResponse, ApiResult, FieldErrors, Error};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::parse_path_id;
use crate::api::middleware::{AuthUser, IdentityState};
use crate::service::{AddMemberOutcome, ORGANISATION_NOT_FOUND, USER_NOT_FOUND};
use crate::{NewOrganisation, Organisation};

/// Organisation response for API operations
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationResponse {
    pub org_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

impl From<Organisation> for OrganisationResponse {
    fn from(organisation: Organisation) -> Self {
        Self {
            org_id: organisation.id,
            name: organisation.name,
            description: organisation.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrganisationListResponse {
    pub organisations: Vec<OrganisationResponse>,
}

/// Organisation plus its member ids
#[derive(Debug, Serialize)]
pub struct OrganisationDetailResponse {
    #[serde(flatten)]
    pub organisation: OrganisationResponse,
    pub members: Vec<Uuid>,
}

/// Request for adding a member
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    #[serde(default)]
    pub user_id: String,
}

/// List organisations for the current user
///
/// **GET /api/organisations**
pub async fn list_organisations(
    AuthUser(auth_context): AuthUser,
    State(state): State<IdentityState>,
) -> ApiResult<OrganisationListResponse> {
    let organisations = state
        .membership
        .list_organisations_for(auth_context.user_id())
        .await?;

    Ok(ApiResponse::ok(
        "Organisations retrieved successfully",
        OrganisationListResponse {
            organisations: organisations
                .into_iter()
                .map(OrganisationResponse::from)
                .collect(),
        },
    ))
}

/// Create a new organisation
///
/// **POST /api/organisations**
///
/// The caller becomes its first member.
pub async fn create_organisation(
    AuthUser(auth_context): AuthUser,
    State(state): State<IdentityState>,
    ApiJson(request): ApiJson<NewOrganisation>,
) -> ApiResult<OrganisationResponse> {
    let organisation = state
        .membership
        .create_organisation(auth_context.user_id(), request)
        .await?;

    Ok(ApiResponse::created(
        "Organisation created successfully",
        OrganisationResponse::from(organisation),
    ))
}

/// Get an organisation the caller belongs to
///
/// **GET /api/organisations/{org_id}**
pub async fn get_organisation(
    AuthUser(auth_context): AuthUser,
    State(state): State<IdentityState>,
    Path(org_id): Path<String>,
) -> ApiResult<OrganisationDetailResponse> {
    let org_id = parse_path_id(&org_id, ORGANISATION_NOT_FOUND)?;

    let (organisation, members) = state
        .membership
        .organisation_with_members(auth_context.user_id(), org_id)
        .await?;

    Ok(ApiResponse::ok(
        "Organisation found",
        OrganisationDetailResponse {
            organisation: OrganisationResponse::from(organisation),
            members,
        },
    ))
}

/// Add a user to an organisation
///
/// **POST /api/organisations/{org_id}/users**
///
/// Only members may add users. Adding an existing member succeeds without
/// changing anything.
pub async fn add_member(
    AuthUser(auth_context): AuthUser,
    State(state): State<IdentityState>,
    Path(org_id): Path<String>,
    ApiJson(request): ApiJson<AddMemberRequest>,
) -> ApiResult<()> {
    let org_id = parse_path_id(&org_id, ORGANISATION_NOT_FOUND)?;

    let raw_user_id = request.user_id.trim();
    if raw_user_id.is_empty() {
        return Err(Error::Validation(FieldErrors::single(
            "userId",
            "User ID is required",
        )));
    }
    let Ok(target) = Uuid::parse_str(raw_user_id) else {
        // A malformed id names no user, but non-members still only see the 403
        state
            .membership
            .authorize_add_member(auth_context.user_id(), org_id)
            .await?;
        return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
    };

    let outcome = state
        .membership
        .add_member(auth_context.user_id(), org_id, target)
        .await?;

    if outcome == AddMemberOutcome::AlreadyMember {
        tracing::debug!(organisation_id = %org_id, member_id = %target, "User already a member");
    }

    Ok(ApiResponse::message_only(
        "User added to organisation successfully",
    ))
}
