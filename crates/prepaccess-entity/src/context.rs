//! Per-check snapshot of the acting user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::permission::Permission;
use crate::role::UserRole;
use crate::section::Section;
use crate::subscription::SubscriptionTier;

/// Context for one access check.
///
/// Built fresh on every check from the authenticated request and discarded
/// afterwards; never cached or persisted, so a profile change takes effect
/// on the next request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccessContext {
    /// The acting user's ID.
    pub user_id: Uuid,
    /// The user's role.
    pub role: UserRole,
    /// The user's subscription tier.
    pub subscription_tier: SubscriptionTier,
    /// Effective permissions (normally the role's set from the table).
    pub permissions: Vec<Permission>,
    /// Section the user is currently in, if known.
    #[serde(default)]
    pub current_section: Option<Section>,
    /// When the session was opened.
    #[serde(default)]
    pub login_time: Option<DateTime<Utc>>,
    /// Last observed activity.
    #[serde(default)]
    pub last_activity: Option<DateTime<Utc>>,
    /// Request origin IP.
    #[serde(default)]
    pub ip_address: Option<String>,
    /// User-Agent header value.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Resolved country code (ISO 3166-1 alpha-2), if known.
    #[serde(default)]
    pub country: Option<String>,
    /// Preferred locale for reasons: `"fr"` or `"en"`.
    #[serde(default = "default_locale")]
    pub locale: String,
    /// IANA timezone name, informational.
    #[serde(default)]
    pub timezone: Option<String>,
    /// When this context was built.
    pub request_time: DateTime<Utc>,
}

fn default_locale() -> String {
    "fr".to_string()
}

impl UserAccessContext {
    /// Creates a context with the required fields; session metadata is
    /// filled in with the builder-style setters.
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        subscription_tier: SubscriptionTier,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            user_id,
            role,
            subscription_tier,
            permissions,
            current_section: None,
            login_time: None,
            last_activity: None,
            ip_address: None,
            user_agent: None,
            country: None,
            locale: default_locale(),
            timezone: None,
            request_time: Utc::now(),
        }
    }

    /// Sets the current section.
    pub fn in_section(mut self, section: Section) -> Self {
        self.current_section = Some(section);
        self
    }

    /// Sets the origin IP.
    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Sets the User-Agent.
    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the resolved country code.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// Sets the preferred locale.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// Whether the context carries the given permission.
    pub fn has_permission(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}
