//! Auth read-model types
//!
//! Lightweight view of the `users` rows owned by the identity domain.
//! Carries only what handlers need to know about the caller.

use serde::Serialize;
use uuid::Uuid;

/// Identity of an authenticated caller. Never includes credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
