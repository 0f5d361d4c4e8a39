//! Domain entities for the Orgauth identity domain
//!
//! Users and organisations are related many-to-many through memberships.
//! Neither side owns the other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
#[derive(Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userId")]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user from already-validated fields.
    ///
    /// `email` must already be normalized and `password_hash` must be a PHC
    /// string produced by the credential store.
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        password_hash: String,
    ) -> Self {
        User {
            id: Uuid::new_v4(),
            first_name,
            last_name,
            email,
            phone,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Organisation entity
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Organisation {
    #[serde(rename = "orgId")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Organisation {
    /// Create a new organisation from already-validated fields
    pub fn new(name: String, description: Option<String>) -> Self {
        Organisation {
            id: Uuid::new_v4(),
            name,
            description,
            created_at: Utc::now(),
        }
    }

    /// The personal organisation every user receives at registration
    pub fn default_for(user: &User) -> Self {
        Self::new(default_organisation_name(&user.first_name), None)
    }
}

/// Appended to the first name to name a user's default organisation
pub const DEFAULT_ORGANISATION_SUFFIX: &str = "'s Organisation";

/// Name of the organisation created for a newly registered user
pub fn default_organisation_name(first_name: &str) -> String {
    format!("{}{}", first_name, DEFAULT_ORGANISATION_SUFFIX)
}

/// Registration input as received from the caller
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Login input as received from the caller
#[derive(Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Organisation creation input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewOrganisation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
