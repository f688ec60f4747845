//! Upstream auth backend (escalation) configuration.

use serde::{Deserialize, Serialize};

/// Settings for the REST backend consulted on escalating checks.
///
/// Static table checks always run first; only checks that pass the local
/// fast path incur a request against this backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the auth backend, e.g. `https://api.example.com`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds. A timeout is treated as a deny.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Optional bearer token identifying this service to the backend.
    #[serde(default)]
    pub service_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            service_token: None,
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    5
}
