//! Registration and login

use std::sync::Arc;

use orgauth_auth::TokenIssuer;
use orgauth_common::{Error, FieldErrors, PasswordHasher, RepositoryError, Result};

use crate::domain::entities::{LoginRequest, Organisation, RegistrationRequest, User};
use crate::domain::validation::{normalize_email, normalize_optional, validate_registration};
use crate::repository::UserStore;

/// Reported for an email that already belongs to a user
pub const EMAIL_TAKEN: &str = "User with this email has been created";

/// Reported for every failed login, whatever the cause
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// A user together with a freshly issued bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: String,
}

#[derive(Clone)]
pub struct IdentityService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    tokens: Arc<dyn TokenIssuer>,
}

impl IdentityService {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Register a user, bootstrap their default organisation and issue a token.
    ///
    /// Every invalid field is reported in one `Error::Validation`.
    pub async fn register(&self, request: RegistrationRequest) -> Result<AuthenticatedUser> {
        let mut errors = validate_registration(&request);
        let email = normalize_email(&request.email);

        if !errors.contains("email") && self.users.find_by_email(&email).await?.is_some() {
            errors.add("email", EMAIL_TAKEN);
        }
        errors.into_result()?;

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(
            request.first_name.trim().to_string(),
            request.last_name.trim().to_string(),
            email,
            normalize_optional(request.phone.as_deref()),
            password_hash,
        );
        let organisation = Organisation::default_for(&user);

        match self
            .users
            .create_with_default_organisation(&user, &organisation)
            .await
        {
            Ok(()) => {}
            // Lost a race with a concurrent registration for the same email
            Err(RepositoryError::AlreadyExists) => {
                return Err(Error::Validation(FieldErrors::single("email", EMAIL_TAKEN)));
            }
            Err(e) => return Err(e.into()),
        }

        let access_token = self.tokens.issue_token(user.id)?;

        tracing::info!(user_id = %user.id, organisation_id = %organisation.id, "User registered");
        Ok(AuthenticatedUser { user, access_token })
    }

    /// Check credentials and issue a fresh token.
    ///
    /// Unknown email, wrong password and missing fields are indistinguishable.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthenticatedUser> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(invalid_credentials());
        }

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                tracing::debug!("Login attempt for unknown email");
                return Err(invalid_credentials());
            }
        };

        if !self.hasher.verify(&request.password, &user.password_hash) {
            tracing::debug!(user_id = %user.id, "Login attempt with wrong password");
            return Err(invalid_credentials());
        }

        let access_token = self.tokens.issue_token(user.id)?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(AuthenticatedUser { user, access_token })
    }
}

fn invalid_credentials() -> Error {
    Error::Authentication(INVALID_CREDENTIALS.to_string())
}
