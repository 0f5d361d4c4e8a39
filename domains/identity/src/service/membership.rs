//! Organisation membership and user-visibility decisions

use std::sync::Arc;

use orgauth_common::{Error, Result};
use uuid::Uuid;

use crate::domain::entities::{NewOrganisation, Organisation, User};
use crate::domain::validation::{normalize_optional, validate_organisation};
use crate::repository::{OrganisationStore, UserStore};

pub const USER_NOT_FOUND: &str = "User not found";
pub const ORGANISATION_NOT_FOUND: &str = "Organisation not found";
pub const VIEW_USER_DENIED: &str = "You do not have permission to view user data";
pub const VIEW_ORGANISATION_DENIED: &str = "You do not have permission to view this organisation";
pub const ADD_MEMBER_DENIED: &str = "You do not have permission to add user";

/// Result of a successful `add_member` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddMemberOutcome {
    Added,
    AlreadyMember,
}

#[derive(Clone)]
pub struct MembershipAuthority {
    users: Arc<dyn UserStore>,
    organisations: Arc<dyn OrganisationStore>,
}

impl MembershipAuthority {
    pub fn new(users: Arc<dyn UserStore>, organisations: Arc<dyn OrganisationStore>) -> Self {
        Self {
            users,
            organisations,
        }
    }

    /// A user may view themselves and anyone sharing an organisation with them
    pub async fn can_view_user(&self, requesting_user: Uuid, target_user: Uuid) -> Result<bool> {
        if requesting_user == target_user {
            return Ok(true);
        }
        Ok(self
            .organisations
            .share_organisation(requesting_user, target_user)
            .await?)
    }

    /// Load a user record if the requester may view it.
    ///
    /// A missing target is `NotFound`; an existing but hidden one is
    /// `Authorization`.
    pub async fn get_user(&self, requesting_user: Uuid, target_user: Uuid) -> Result<User> {
        let user = self
            .users
            .find_by_id(target_user)
            .await?
            .ok_or_else(|| Error::NotFound(USER_NOT_FOUND.to_string()))?;

        if !self.can_view_user(requesting_user, target_user).await? {
            tracing::debug!(
                user_id = %requesting_user,
                target_user_id = %target_user,
                "User lookup denied"
            );
            return Err(Error::Authorization(VIEW_USER_DENIED.to_string()));
        }

        Ok(user)
    }

    /// Organisations the user belongs to, ordered by name
    pub async fn list_organisations_for(&self, user_id: Uuid) -> Result<Vec<Organisation>> {
        Ok(self.organisations.organisations_of(user_id).await?)
    }

    /// Load an organisation the acting user is a member of
    pub async fn get_organisation(&self, acting_user: Uuid, org_id: Uuid) -> Result<Organisation> {
        let organisation = self.find_organisation(org_id).await?;

        if !self.organisations.is_member(org_id, acting_user).await? {
            return Err(Error::Authorization(VIEW_ORGANISATION_DENIED.to_string()));
        }

        Ok(organisation)
    }

    /// Member ids of an organisation the acting user belongs to
    pub async fn members_of(&self, acting_user: Uuid, org_id: Uuid) -> Result<Vec<Uuid>> {
        let (_, members) = self.organisation_with_members(acting_user, org_id).await?;
        Ok(members)
    }

    /// An organisation and its member ids, read once.
    ///
    /// Membership of the acting user is decided from the same member list
    /// that is returned.
    pub async fn organisation_with_members(
        &self,
        acting_user: Uuid,
        org_id: Uuid,
    ) -> Result<(Organisation, Vec<Uuid>)> {
        let organisation = self.find_organisation(org_id).await?;
        let members = self.organisations.members_of(org_id).await?;

        if !members.contains(&acting_user) {
            return Err(Error::Authorization(VIEW_ORGANISATION_DENIED.to_string()));
        }

        Ok((organisation, members))
    }

    /// Create an organisation with `creator` as its first member
    pub async fn create_organisation(
        &self,
        creator: Uuid,
        request: NewOrganisation,
    ) -> Result<Organisation> {
        validate_organisation(&request).into_result()?;

        let organisation = Organisation::new(
            request.name.trim().to_string(),
            normalize_optional(request.description.as_deref()),
        );
        self.organisations
            .create_with_member(&organisation, creator)
            .await?;

        tracing::info!(
            user_id = %creator,
            organisation_id = %organisation.id,
            "Organisation created"
        );
        Ok(organisation)
    }

    /// Add `target_user` to an organisation the acting user belongs to.
    ///
    /// The target is resolved only after the permission check, so
    /// non-members learn nothing about which users exist.
    pub async fn add_member(
        &self,
        acting_user: Uuid,
        org_id: Uuid,
        target_user: Uuid,
    ) -> Result<AddMemberOutcome> {
        self.authorize_add_member(acting_user, org_id).await?;

        if self.users.find_by_id(target_user).await?.is_none() {
            return Err(Error::NotFound(USER_NOT_FOUND.to_string()));
        }

        let inserted = self.organisations.add_member(org_id, target_user).await?;
        if inserted {
            tracing::info!(
                user_id = %acting_user,
                organisation_id = %org_id,
                member_id = %target_user,
                "Member added to organisation"
            );
            Ok(AddMemberOutcome::Added)
        } else {
            Ok(AddMemberOutcome::AlreadyMember)
        }
    }

    /// Fail unless the organisation exists and the acting user belongs to it
    pub async fn authorize_add_member(&self, acting_user: Uuid, org_id: Uuid) -> Result<()> {
        self.find_organisation(org_id).await?;

        if !self.organisations.is_member(org_id, acting_user).await? {
            tracing::debug!(
                user_id = %acting_user,
                organisation_id = %org_id,
                "Add member denied"
            );
            return Err(Error::Authorization(ADD_MEMBER_DENIED.to_string()));
        }

        Ok(())
    }

    async fn find_organisation(&self, org_id: Uuid) -> Result<Organisation> {
        self.organisations
            .find_by_id(org_id)
            .await?
            .ok_or_else(|| Error::NotFound(ORGANISATION_NOT_FOUND.to_string()))
    }
}
