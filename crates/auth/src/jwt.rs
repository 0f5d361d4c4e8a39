//! Bearer token issuing, validation and header parsing

use axum::http::HeaderValue;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::claims::AccessClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;

/// Mints bearer tokens bound to a user id
pub trait TokenIssuer: Send + Sync {
    fn issue_token(&self, user_id: Uuid) -> Result<String, AuthError>;
}

/// HS256 JWT issuer and validator sharing one `AuthConfig`
#[derive(Debug, Clone)]
pub struct JwtTokenIssuer {
    config: AuthConfig,
}

impl JwtTokenIssuer {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Validate signature, expiry and (when configured) issuer and audience
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);

        if let Some(aud) = &self.config.audience {
            validation.set_audience(&[aud]);
        } else {
            validation.validate_aud = false;
        }

        if let Some(iss) = &self.config.issuer {
            validation.set_issuer(&[iss]);
        }

        let decoding_key = DecodingKey::from_secret(self.config.jwt_secret.as_ref());

        let token_data = decode::<AccessClaims>(token, &decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "JWT validation failed");
            AuthError::InvalidToken
        })?;

        Ok(token_data.claims)
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = AccessClaims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.config.token_ttl_seconds,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let encoding_key = EncodingKey::from_secret(self.config.jwt_secret.as_ref());
        encode(&Header::new(Algorithm::HS256), &claims, &encoding_key).map_err(|e| {
            tracing::error!(error = %e, user_id = %user_id, "Failed to sign access token");
            AuthError::TokenCreationFailed
        })
    }
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
