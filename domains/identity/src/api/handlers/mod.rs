//! HTTP handlers for the identity domain

pub mod auth;
pub mod organisations;
pub mod users;

use orgauth_common::{Error, Result};
use uuid::Uuid;

/// Parse a path identifier; anything that is not an id cannot name a record
pub(crate) fn parse_path_id(raw: &str, not_found: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| Error::NotFound(not_found.to_string()))
}
