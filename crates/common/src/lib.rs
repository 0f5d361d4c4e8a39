//! Shared utilities, configuration, and error handling for Orgauth
//!
//! This crate provides common functionality used across the Orgauth service:
//! - Configuration management following 12-factor principles
//! - Error types, field-level validation errors and the response envelope
//! - Password hashing for the credential store

pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
pub mod extractors;
pub mod response;

pub use crypto::PasswordHasher;
pub use db::RepositoryError;
pub use error::{Error, FieldError, FieldErrors, Result};
pub use extractors::ApiJson;
pub use response::{ApiResponse, ApiResult};
