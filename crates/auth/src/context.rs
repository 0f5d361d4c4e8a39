//! Request-scoped context for authenticated users

use uuid::Uuid;

use crate::types::AuthIdentity;

/// The caller behind a request.
///
/// Handlers pass `user_id()` explicitly into every authorization decision.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}
