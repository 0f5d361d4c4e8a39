//! Identity domain: users, organisations, memberships, registration and login

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;

// Re-export repository types
pub use repository::{
    add_member_tx, insert_organisation_tx, insert_user_tx, InMemoryStore, OrganisationRepository,
    OrganisationStore, UserRepository, UserStore,
};

// Re-export services
pub use service::{AddMemberOutcome, IdentityService, MembershipAuthority};

// Re-export API types
pub use api::routes;
pub use api::IdentityState;
