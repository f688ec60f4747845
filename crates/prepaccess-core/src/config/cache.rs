//! Verdict cache configuration.

use serde::{Deserialize, Serialize};

/// Settings for the in-process verdict cache that de-duplicates
/// escalating checks across simultaneous guards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached verdicts, in seconds. `0` disables caching.
    #[serde(default = "default_ttl")]
    pub verdict_ttl_seconds: u64,
    /// Maximum number of cached verdicts.
    #[serde(default = "default_capacity")]
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            verdict_ttl_seconds: default_ttl(),
            max_entries: default_capacity(),
        }
    }
}

fn default_ttl() -> u64 {
    5
}

fn default_capacity() -> u64 {
    10_000
}
