//! Session token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use quizhub_core::config::AuthConfig;
use quizhub_core::types::UserId;

use super::claims::Claims;
use super::error::TokenError;

/// Creates HS256-signed session tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    has_secret: bool,
    default_lifespan: Duration,
}

/// A freshly signed token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Compact JWS string.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("default_lifespan", &self.default_lifespan)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            has_secret: !config.jwt_secret.is_empty(),
            default_lifespan: config.token_lifespan(),
        }
    }

    /// Signs a token for `user_id` carrying `role`, valid for `lifespan`.
    pub fn issue(
        &self,
        user_id: UserId,
        role: &str,
        lifespan: Duration,
    ) -> Result<IssuedToken, TokenError> {
        if !self.has_secret {
            return Err(TokenError::Signing("signing secret is empty".into()));
        }
        if lifespan <= Duration::zero() {
            return Err(TokenError::Signing("lifespan must be positive".into()));
        }

        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(lifespan)
            .ok_or_else(|| TokenError::Signing("lifespan out of range".into()))?;
        let claims = Claims {
            sub: user_id,
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Signs a token with the configured lifespan.
    pub fn issue_default(&self, user_id: UserId, role: &str) -> Result<IssuedToken, TokenError> {
        self.issue(user_id, role, self.default_lifespan)
    }
}
