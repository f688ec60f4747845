//! The outcome of every access check.

use serde::{Deserialize, Serialize};

use crate::permission::Permission;
use crate::role::UserRole;
use crate::subscription::SubscriptionTier;

/// Fixed upgrade path surfaced on subscription denials.
pub const UPGRADE_URL: &str = "/abonnement";

/// Follow-up action a denied caller can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FallbackAction {
    /// Navigate to the given path.
    Redirect {
        /// Target path.
        to: String,
    },
    /// Offer the subscription upgrade flow.
    ShowUpgrade,
}

/// The sole output contract of every access check.
///
/// Checks never fail with an error: any internal or backend failure is
/// converted into a deny verdict (fail closed), and every deny carries a
/// bilingual human-readable reason plus actionable next steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessVerdict {
    /// Whether access is granted.
    pub allowed: bool,
    /// French reason shown to the user.
    pub reason: String,
    /// English reason.
    pub reason_en: String,
    /// Roles that would satisfy the check, on role-insufficient denials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Vec<UserRole>>,
    /// Tiers that would satisfy the check, on subscription denials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_subscription: Option<Vec<SubscriptionTier>>,
    /// Permissions the check required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_permissions: Option<Vec<Permission>>,
    /// Upgrade path, present on subscription denials.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_url: Option<String>,
    /// Suggested follow-up action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_action: Option<FallbackAction>,
}

impl AccessVerdict {
    /// An allow verdict.
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: "Accès autorisé".to_string(),
            reason_en: "Access granted".to_string(),
            required_role: None,
            required_subscription: None,
            required_permissions: None,
            upgrade_url: None,
            fallback_action: None,
        }
    }

    /// A deny verdict with a bilingual reason.
    pub fn deny(reason_fr: impl Into<String>, reason_en: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason_fr.into(),
            reason_en: reason_en.into(),
            required_role: None,
            required_subscription: None,
            required_permissions: None,
            upgrade_url: None,
            fallback_action: None,
        }
    }

    /// Attach the roles that would satisfy the check.
    pub fn with_required_roles(mut self, roles: Vec<UserRole>) -> Self {
        self.required_role = Some(roles);
        self
    }

    /// Attach the tiers that would satisfy the check, plus the upgrade path.
    pub fn with_required_subscription(mut self, tiers: Vec<SubscriptionTier>) -> Self {
        self.required_subscription = Some(tiers);
        self.upgrade_url = Some(UPGRADE_URL.to_string());
        self.fallback_action = Some(FallbackAction::ShowUpgrade);
        self
    }

    /// Attach the permissions the check required.
    pub fn with_required_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.required_permissions = Some(permissions);
        self
    }

    /// Attach a redirect follow-up.
    pub fn with_redirect(mut self, to: impl Into<String>) -> Self {
        self.fallback_action = Some(FallbackAction::Redirect { to: to.into() });
        self
    }

    /// The reason in the given locale (`"en"` selects English, anything
    /// else the French default).
    pub fn localized_reason(&self, locale: &str) -> &str {
        if locale.eq_ignore_ascii_case("en") {
            &self.reason_en
        } else {
            &self.reason
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_denial_carries_upgrade_path() {
        let verdict = AccessVerdict::deny("Abonnement requis", "Subscription required")
            .with_required_subscription(vec![SubscriptionTier::Premium, SubscriptionTier::Pro]);
        assert!(!verdict.allowed);
        assert_eq!(verdict.upgrade_url.as_deref(), Some(UPGRADE_URL));
        assert_eq!(verdict.fallback_action, Some(FallbackAction::ShowUpgrade));
    }

    #[test]
    fn test_localized_reason() {
        let verdict = AccessVerdict::deny("Accès refusé", "Access denied");
        assert_eq!(verdict.localized_reason("fr"), "Accès refusé");
        assert_eq!(verdict.localized_reason("en"), "Access denied");
        assert_eq!(verdict.localized_reason("de"), "Accès refusé");
    }

    #[test]
    fn test_optional_fields_omitted_from_wire() {
        let json = serde_json::to_value(AccessVerdict::allow()).unwrap();
        assert!(json.get("upgrade_url").is_none());
        assert!(json.get("required_role").is_none());
    }
}
