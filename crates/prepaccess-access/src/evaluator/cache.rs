//! Short-lived verdict cache.
//!
//! De-duplicates escalating checks across simultaneous guards on one page:
//! N identical checks within the TTL cost one backend call. Local-only
//! denials are never cached — they are already cheap.

use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

use prepaccess_core::config::cache::CacheConfig;
use prepaccess_entity::{AccessVerdict, Permission, Section};

/// Cache key: one entry per user, check kind, and resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerdictKey {
    user_id: Uuid,
    kind: CheckKind,
    resource: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CheckKind {
    Section,
    Permission,
}

impl VerdictKey {
    /// Key for a section escalation.
    pub fn section(user_id: Uuid, target: Section) -> Self {
        Self {
            user_id,
            kind: CheckKind::Section,
            resource: target.as_str().to_string(),
        }
    }

    /// Key for a permission escalation.
    pub fn permission(user_id: Uuid, permission: Permission, resource: Option<&str>) -> Self {
        Self {
            user_id,
            kind: CheckKind::Permission,
            resource: match resource {
                Some(r) => format!("{permission}:{r}"),
                None => permission.as_str().to_string(),
            },
        }
    }
}

/// TTL cache over escalated verdicts. A zero TTL disables caching.
#[derive(Debug, Clone)]
pub struct VerdictCache {
    inner: Option<Cache<VerdictKey, AccessVerdict>>,
}

impl VerdictCache {
    /// Builds the cache from configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let inner = (config.verdict_ttl_seconds > 0).then(|| {
            Cache::builder()
                .max_capacity(config.max_entries)
                .time_to_live(Duration::from_secs(config.verdict_ttl_seconds))
                .build()
        });
        Self { inner }
    }

    /// A disabled cache.
    pub fn disabled() -> Self {
        Self { inner: None }
    }

    /// Looks up a cached verdict.
    pub async fn get(&self, key: &VerdictKey) -> Option<AccessVerdict> {
        match &self.inner {
            Some(cache) => cache.get(key).await,
            None => None,
        }
    }

    /// Stores a verdict.
    pub async fn insert(&self, key: VerdictKey, verdict: AccessVerdict) {
        if let Some(cache) = &self.inner {
            cache.insert(key, verdict).await;
        }
    }
}
