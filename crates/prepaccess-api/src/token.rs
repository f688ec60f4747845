//! Access-token decoding.
//!
//! Tokens are issued by the platform backend; this service only validates
//! them and reads the role/tier claims used to build request contexts.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use prepaccess_core::config::auth::AuthConfig;
use prepaccess_core::{AppError, AppResult};
use prepaccess_entity::{SubscriptionTier, UserRole};

/// Claims payload embedded in every platform access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject — the user ID.
    pub sub: Uuid,
    /// User role at the time of token issuance.
    pub role: UserRole,
    /// Subscription tier at the time of token issuance.
    pub tier: SubscriptionTier,
    /// Preferred locale (`"fr"`/`"en"`).
    #[serde(default)]
    pub locale: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

/// Validates platform access tokens (HMAC-SHA256).
#[derive(Clone)]
pub struct TokenDecoder {
    key: DecodingKey,
    validation: Validation,
}

// DecodingKey is not Debug, and the key material must not end up in
// logs anyway.
impl fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenDecoder").finish_non_exhaustive()
    }
}

impl TokenDecoder {
    /// Builds a decoder from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway_seconds;
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a token, returning its claims.
    pub fn decode(&self, token: &str) -> AppResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::unauthorized(format!("Invalid access token: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header};

    fn encode(claims: &Claims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims() -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: Uuid::new_v4(),
            role: UserRole::Student,
            tier: SubscriptionTier::Premium,
            locale: Some("fr".to_string()),
            iat: now,
            exp: now + 900,
        }
    }

    #[test]
    fn test_round_trip() {
        let config = AuthConfig::default();
        let decoder = TokenDecoder::new(&config);
        let token = encode(&claims(), &config.jwt_secret);
        let decoded = decoder.decode(&token).unwrap();
        assert_eq!(decoded.role, UserRole::Student);
        assert_eq!(decoded.tier, SubscriptionTier::Premium);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let decoder = TokenDecoder::new(&AuthConfig::default());
        let token = encode(&claims(), "some-other-secret");
        let err = decoder.decode(&token).unwrap_err();
        assert_eq!(err.kind, prepaccess_core::ErrorKind::Unauthorized);
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let config = AuthConfig::default();
        let rendered = format!("{:?}", TokenDecoder::new(&config));
        assert!(rendered.starts_with("TokenDecoder"));
        assert!(!rendered.contains(&config.jwt_secret));
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = AuthConfig {
            jwt_leeway_seconds: 0,
            ..AuthConfig::default()
        };
        let decoder = TokenDecoder::new(&config);
        let mut expired = claims();
        expired.iat -= 3600;
        expired.exp = expired.iat + 60;
        let token = encode(&expired, &config.jwt_secret);
        assert!(decoder.decode(&token).is_err());
    }
}
