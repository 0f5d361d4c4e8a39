//! Authentication middleware for Orgauth
//!
//! Issues and validates HS256 bearer tokens and provides the `AuthUser`
//! extractor, which works with any domain state implementing `FromRef<S>`
//! for `AuthBackend`.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod types;

pub use backend::{AuthBackend, IdentityLookup, PgIdentityLookup};
pub use claims::AccessClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use jwt::{JwtTokenIssuer, TokenIssuer};
pub use types::AuthIdentity;
