//! Repository layer for the identity domain
//!
//! The services depend on the `UserStore` and `OrganisationStore` traits.
//! `UserRepository` and `OrganisationRepository` implement them over
//! Postgres; `InMemoryStore` implements both for tests and local runs.

pub mod memory;
pub mod organisations;
pub mod transactions;
pub mod users;

use async_trait::async_trait;
use orgauth_common::RepositoryError;
use uuid::Uuid;

use crate::domain::entities::{Organisation, User};

pub use memory::InMemoryStore;
pub use organisations::OrganisationRepository;
pub use transactions::{add_member_tx, insert_organisation_tx, insert_user_tx};
pub use users::UserRepository;

pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence for user records
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<User>>;

    /// Look up by normalized email
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;

    /// Persist `user`, `organisation` and the membership between them as one
    /// unit. Returns `AlreadyExists` when the email is taken.
    async fn create_with_default_organisation(
        &self,
        user: &User,
        organisation: &Organisation,
    ) -> RepositoryResult<()>;
}

/// Persistence for organisations and the membership relation
#[async_trait]
pub trait OrganisationStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Organisation>>;

    /// Persist `organisation` with `creator` as its first member, atomically
    async fn create_with_member(
        &self,
        organisation: &Organisation,
        creator: Uuid,
    ) -> RepositoryResult<()>;

    /// Add a membership. Returns `false` when it already existed.
    async fn add_member(&self, organisation_id: Uuid, user_id: Uuid) -> RepositoryResult<bool>;

    async fn is_member(&self, organisation_id: Uuid, user_id: Uuid) -> RepositoryResult<bool>;

    /// Member user ids in join order
    async fn members_of(&self, organisation_id: Uuid) -> RepositoryResult<Vec<Uuid>>;

    /// Organisations `user_id` belongs to, ordered by name then id
    async fn organisations_of(&self, user_id: Uuid) -> RepositoryResult<Vec<Organisation>>;

    /// Whether the two users have at least one organisation in common
    async fn share_organisation(&self, a: Uuid, b: Uuid) -> RepositoryResult<bool>;
}
