//! Declarative access rules and their conditions.

use serde::{Deserialize, Serialize};

use crate::permission::Permission;
use crate::role::UserRole;
use crate::section::Section;
use crate::subscription::SubscriptionTier;

/// A richer declarative rule, evaluated in batches by
/// `validate_access_rules` independently of the simpler per-call checks.
///
/// Stages are checked in order — roles (any-of), tiers (any-of),
/// permissions (all-of), then each condition — stopping at the first
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessRule {
    /// Unique rule identifier; keys the batch-validation result map.
    pub id: String,
    /// Human-readable rule name.
    #[serde(default)]
    pub name: Option<String>,
    /// Acceptable roles. Empty or absent = any role.
    #[serde(default)]
    pub required_roles: Vec<UserRole>,
    /// Acceptable subscription tiers. Empty or absent = any tier.
    #[serde(default)]
    pub required_tiers: Vec<SubscriptionTier>,
    /// Permissions the context must all carry (AND semantics).
    #[serde(default)]
    pub required_permissions: Vec<Permission>,
    /// Section this rule targets, if any.
    #[serde(default)]
    pub section: Option<Section>,
    /// Resource identifier this rule targets, if any.
    #[serde(default)]
    pub resource: Option<String>,
    /// Action name this rule targets, if any.
    #[serde(default)]
    pub action: Option<String>,
    /// Conditions evaluated sequentially after the static stages pass.
    #[serde(default)]
    pub conditions: Vec<AccessCondition>,
}

/// A check-time condition attached to an [`AccessRule`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessCondition {
    /// Allowed within a UTC hour window, optionally restricted to weekdays.
    Time {
        /// Window start hour, inclusive, 0-23.
        start_hour: u8,
        /// Window end hour, exclusive, 0-23. May be below `start_hour`
        /// for windows that wrap past midnight.
        end_hour: u8,
        /// Allowed weekdays (`mon`..`sun`). Empty = every day.
        #[serde(default)]
        days: Vec<Weekday>,
    },
    /// Allowed from the listed countries only (ISO 3166-1 alpha-2).
    Location {
        /// Allowed country codes.
        allowed_countries: Vec<String>,
    },
    /// Allowed from the listed device kinds only.
    Device {
        /// Allowed device kinds.
        allowed: Vec<DeviceKind>,
    },
    /// Delegated to the auth backend's condition evaluator.
    Custom {
        /// Backend condition key.
        key: String,
        /// Opaque parameters forwarded to the backend.
        #[serde(default)]
        params: serde_json::Value,
    },
}

/// Day of week used by time conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Convert from a chrono weekday.
    pub fn from_chrono(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
            chrono::Weekday::Sun => Self::Sun,
        }
    }
}

/// Device category classified from the User-Agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Desktop,
    Mobile,
    Tablet,
}

impl DeviceKind {
    /// Classify a User-Agent string.
    ///
    /// Tablet markers are checked before mobile ones because tablet UAs
    /// frequently contain "Mobile" as well.
    pub fn classify(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("ipad") || ua.contains("tablet") {
            Self::Tablet
        } else if ua.contains("mobile") || ua.contains("android") || ua.contains("iphone") {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}
