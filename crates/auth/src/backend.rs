//! Concrete authentication backend
//!
//! Couples the token validator with a read model of user identities.
//! The Postgres read model uses runtime `sqlx::query_as` (not macros),
//! consistent with the other cross-domain reads.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::JwtTokenIssuer;
use crate::types::AuthIdentity;

/// Read model used to resolve the subject of a validated token
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError>;
}

/// `IdentityLookup` over the `users` table
#[derive(Clone)]
pub struct PgIdentityLookup {
    pool: PgPool,
}

impl PgIdentityLookup {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityLookup for PgIdentityLookup {
    async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, email, first_name, last_name
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }
}

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    tokens: JwtTokenIssuer,
    identities: Arc<dyn IdentityLookup>,
}

impl AuthBackend {
    pub fn new(config: AuthConfig, identities: Arc<dyn IdentityLookup>) -> Self {
        Self {
            tokens: JwtTokenIssuer::new(config),
            identities,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        self.tokens.config()
    }

    /// Issuer sharing this backend's signing configuration
    pub fn tokens(&self) -> &JwtTokenIssuer {
        &self.tokens
    }

    /// Resolve a bearer token into the caller's context.
    ///
    /// Tokens whose subject no longer exists are rejected.
    pub async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = self.tokens.validate_token(token)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = self
            .identities
            .find_identity(user_id)
            .await?
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "Token subject not found");
                AuthError::UserNotFound
            })?;

        Ok(AuthContext::new(user))
    }
}
