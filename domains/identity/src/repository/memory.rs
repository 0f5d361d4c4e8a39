//! In-memory store
//!
//! Implements every store trait plus the auth identity read model over a
//! single mutex-guarded state. Multi-record writes happen under one guard,
//! so they are all-or-nothing like their Postgres counterparts.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use orgauth_auth::{AuthError, AuthIdentity, IdentityLookup};
use orgauth_common::RepositoryError;
use uuid::Uuid;

use super::{OrganisationStore, RepositoryResult, UserStore};
use crate::domain::entities::{Organisation, User};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    user_ids_by_email: HashMap<String, Uuid>,
    organisations: HashMap<Uuid, Organisation>,
    /// Member ids per organisation, in join order
    members: HashMap<Uuid, Vec<Uuid>>,
}

impl State {
    fn is_member(&self, organisation_id: Uuid, user_id: Uuid) -> bool {
        self.members
            .get(&organisation_id)
            .is_some_and(|m| m.contains(&user_id))
    }
}

/// Process-local store shared by clones
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, State>> {
        self.state.lock().map_err(|_| {
            tracing::error!("In-memory store lock poisoned");
            RepositoryError::InvalidData("In-memory store lock poisoned".to_string())
        })
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>> {
        let state = self.lock()?;
        Ok(state
            .user_ids_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn create_with_default_organisation(
        &self,
        user: &User,
        organisation: &Organisation,
    ) -> RepositoryResult<()> {
        let mut state = self.lock()?;

        if state.user_ids_by_email.contains_key(&user.email)
            || state.users.contains_key(&user.id)
            || state.organisations.contains_key(&organisation.id)
        {
            return Err(RepositoryError::AlreadyExists);
        }

        state.user_ids_by_email.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());
        state
            .organisations
            .insert(organisation.id, organisation.clone());
        state.members.insert(organisation.id, vec![user.id]);
        Ok(())
    }
}

#[async_trait]
impl OrganisationStore for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Organisation>> {
        Ok(self.lock()?.organisations.get(&id).cloned())
    }

    async fn create_with_member(
        &self,
        organisation: &Organisation,
        creator: Uuid,
    ) -> RepositoryResult<()> {
        let mut state = self.lock()?;

        if state.organisations.contains_key(&organisation.id) {
            return Err(RepositoryError::AlreadyExists);
        }
        if !state.users.contains_key(&creator) {
            return Err(RepositoryError::InvalidData(format!(
                "Unknown member {}",
                creator
            )));
        }

        state
            .organisations
            .insert(organisation.id, organisation.clone());
        state.members.insert(organisation.id, vec![creator]);
        Ok(())
    }

    async fn add_member(&self, organisation_id: Uuid, user_id: Uuid) -> RepositoryResult<bool> {
        let mut state = self.lock()?;

        if !state.organisations.contains_key(&organisation_id)
            || !state.users.contains_key(&user_id)
        {
            return Err(RepositoryError::NotFound);
        }
        if state.is_member(organisation_id, user_id) {
            return Ok(false);
        }

        state
            .members
            .entry(organisation_id)
            .or_default()
            .push(user_id);
        Ok(true)
    }

    async fn is_member(&self, organisation_id: Uuid, user_id: Uuid) -> RepositoryResult<bool> {
        Ok(self.lock()?.is_member(organisation_id, user_id))
    }

    async fn members_of(&self, organisation_id: Uuid) -> RepositoryResult<Vec<Uuid>> {
        Ok(self
            .lock()?
            .members
            .get(&organisation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn organisations_of(&self, user_id: Uuid) -> RepositoryResult<Vec<Organisation>> {
        let state = self.lock()?;
        let mut organisations: Vec<Organisation> = state
            .members
            .iter()
            .filter(|(_, members)| members.contains(&user_id))
            .filter_map(|(org_id, _)| state.organisations.get(org_id).cloned())
            .collect();
        organisations.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(organisations)
    }

    async fn share_organisation(&self, a: Uuid, b: Uuid) -> RepositoryResult<bool> {
        let state = self.lock()?;
        Ok(state
            .members
            .values()
            .any(|members| members.contains(&a) && members.contains(&b)))
    }
}

#[async_trait]
impl IdentityLookup for InMemoryStore {
    async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let state = self.lock().map_err(|_| AuthError::UserLoadError)?;
        Ok(state.users.get(&id).map(|user| AuthIdentity {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }))
    }
}
