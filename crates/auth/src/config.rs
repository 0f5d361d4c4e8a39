//! Authentication configuration

use orgauth_common::config::{Config, DEFAULT_JWT_TTL_SECONDS};

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Lifetime of issued tokens
    pub token_ttl_seconds: i64,
}

impl AuthConfig {
    /// Config with only a signing secret and the default lifetime
    pub fn with_secret(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: None,
            audience: None,
            token_ttl_seconds: DEFAULT_JWT_TTL_SECONDS,
        }
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            token_ttl_seconds: config.jwt_ttl_seconds,
        }
    }
}
