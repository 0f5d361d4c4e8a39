//! Identity domain state and auth backend integration

use std::sync::Arc;

use axum::extract::FromRef;
use orgauth_auth::AuthBackend;
use orgauth_common::PasswordHasher;

use crate::repository::{OrganisationStore, UserStore};
use crate::service::{IdentityService, MembershipAuthority};

pub use orgauth_auth::AuthUser;

/// Application state for the identity domain
#[derive(Clone)]
pub struct IdentityState {
    pub identity: IdentityService,
    pub membership: MembershipAuthority,
    pub auth: AuthBackend,
}

impl IdentityState {
    /// Wire both services over the given stores.
    ///
    /// Tokens are issued with the same configuration `auth` validates with.
    pub fn new(
        users: Arc<dyn UserStore>,
        organisations: Arc<dyn OrganisationStore>,
        hasher: PasswordHasher,
        auth: AuthBackend,
    ) -> Self {
        let tokens = Arc::new(auth.tokens().clone());
        Self {
            identity: IdentityService::new(users.clone(), hasher, tokens),
            membership: MembershipAuthority::new(users, organisations),
            auth,
        }
    }
}

impl FromRef<IdentityState> for AuthBackend {
    fn from_ref(state: &IdentityState) -> Self {
        state.auth.clone()
    }
}
