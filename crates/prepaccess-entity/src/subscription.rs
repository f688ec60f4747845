//! Subscription tier enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Monetization tier gating feature access.
///
/// Totally ordered: Free < Essential < Premium < Pro. Higher tiers are
/// supersets of lower-tier entitlements by convention; the policy table
/// enforces this per feature, not structurally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    /// No paid subscription.
    Free,
    /// Entry-level subscription.
    Essential,
    /// Mid-level subscription with live sessions.
    Premium,
    /// Top subscription with every entitlement.
    Pro,
}

impl SubscriptionTier {
    /// All tiers, in ascending order.
    pub const ALL: [SubscriptionTier; 4] =
        [Self::Free, Self::Essential, Self::Premium, Self::Pro];

    /// Return the tier's rank (higher = more entitled).
    pub fn rank(&self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Essential => 1,
            Self::Premium => 2,
            Self::Pro => 3,
        }
    }

    /// Check if this tier meets the given minimum.
    pub fn satisfies(&self, minimum: &SubscriptionTier) -> bool {
        self.rank() >= minimum.rank()
    }

    /// Return the tier as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Essential => "ESSENTIAL",
            Self::Premium => "PREMIUM",
            Self::Pro => "PRO",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SubscriptionTier {
    type Err = prepaccess_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "FREE" => Ok(Self::Free),
            "ESSENTIAL" => Ok(Self::Essential),
            "PREMIUM" => Ok(Self::Premium),
            "PRO" => Ok(Self::Pro),
            _ => Err(prepaccess_core::AppError::validation(format!(
                "Invalid subscription tier: '{s}'. Expected one of: FREE, ESSENTIAL, PREMIUM, PRO"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(SubscriptionTier::Free < SubscriptionTier::Essential);
        assert!(SubscriptionTier::Essential < SubscriptionTier::Premium);
        assert!(SubscriptionTier::Premium < SubscriptionTier::Pro);
    }

    #[test]
    fn test_satisfies() {
        assert!(SubscriptionTier::Pro.satisfies(&SubscriptionTier::Premium));
        assert!(SubscriptionTier::Premium.satisfies(&SubscriptionTier::Premium));
        assert!(!SubscriptionTier::Free.satisfies(&SubscriptionTier::Essential));
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "premium".parse::<SubscriptionTier>().unwrap(),
            SubscriptionTier::Premium
        );
        assert!("PLATINUM".parse::<SubscriptionTier>().is_err());
    }
}
