//! Feature-access values of the role policy table.

use serde::{Deserialize, Serialize};

use crate::subscription::SubscriptionTier;

/// Access setting for one product feature within a role's policy.
///
/// Either a plain on/off switch or a list of subscription tiers that
/// unlock the feature. Consumers must discriminate on the variant; a
/// tier list is non-empty by construction of the static table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureAccess {
    /// Feature is unconditionally on or off for the role.
    Enabled(bool),
    /// Feature is unlocked for the listed tiers only.
    Tiers(Vec<SubscriptionTier>),
}

impl FeatureAccess {
    /// Resolve the setting against a concrete tier.
    pub fn allows(&self, tier: &SubscriptionTier) -> bool {
        match self {
            Self::Enabled(on) => *on,
            Self::Tiers(tiers) => tiers.contains(tier),
        }
    }

    /// Return the tier list when the feature is tier-gated.
    pub fn required_tiers(&self) -> Option<&[SubscriptionTier]> {
        match self {
            Self::Enabled(_) => None,
            Self::Tiers(tiers) => Some(tiers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_value() {
        assert!(FeatureAccess::Enabled(true).allows(&SubscriptionTier::Free));
        assert!(!FeatureAccess::Enabled(false).allows(&SubscriptionTier::Pro));
    }

    #[test]
    fn test_tier_list_membership() {
        let gated =
            FeatureAccess::Tiers(vec![SubscriptionTier::Premium, SubscriptionTier::Pro]);
        assert!(gated.allows(&SubscriptionTier::Pro));
        assert!(!gated.allows(&SubscriptionTier::Free));
        assert_eq!(
            gated.required_tiers().unwrap(),
            &[SubscriptionTier::Premium, SubscriptionTier::Pro]
        );
    }

    #[test]
    fn test_untagged_deserialization() {
        let on: FeatureAccess = serde_json::from_str("true").unwrap();
        assert_eq!(on, FeatureAccess::Enabled(true));

        let gated: FeatureAccess = serde_json::from_str("[\"PREMIUM\",\"PRO\"]").unwrap();
        assert_eq!(
            gated,
            FeatureAccess::Tiers(vec![SubscriptionTier::Premium, SubscriptionTier::Pro])
        );
    }
}
