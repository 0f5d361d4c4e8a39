//! Core services of the identity domain
//!
//! `IdentityService` handles registration and login; `MembershipAuthority`
//! makes every organisation and user-visibility decision. Both take the
//! acting user explicitly and depend only on the store traits.

pub mod identity;
pub mod membership;

pub use identity::{AuthenticatedUser, IdentityService, EMAIL_TAKEN, INVALID_CREDENTIALS};
pub use membership::{
    AddMemberOutcome, MembershipAuthority, ADD_MEMBER_DENIED, ORGANISATION_NOT_FOUND,
    USER_NOT_FOUND, VIEW_ORGANISATION_DENIED, VIEW_USER_DENIED,
};
