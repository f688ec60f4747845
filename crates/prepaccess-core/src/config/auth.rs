//! Token validation configuration.

use serde::{Deserialize, Serialize};

/// Settings for validating access tokens issued by the platform backend.
///
/// PrepAccess never issues tokens itself; it only decodes and validates
/// them to build a per-request [`UserAccessContext`].
///
/// [`UserAccessContext`]: https://docs.rs/prepaccess-entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for JWT validation (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Clock-skew leeway in seconds applied to `exp`/`iat` validation.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_leeway_seconds: default_leeway(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    30
}
