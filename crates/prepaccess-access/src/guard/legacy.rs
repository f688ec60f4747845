//! Compatibility guard for routes still carrying flat role lists.
//!
//! The role is supplied explicitly by the caller; there is no ambient
//! storage read and no silent default role. An unresolved role is an
//! explicit deny.

use prepaccess_entity::{AccessVerdict, UserRole};

use super::GuardOutcome;

/// Path denied callers are redirected to.
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Flat allowed-role-list gate.
#[derive(Debug, Clone)]
pub struct LegacyRoleGuard {
    allowed_roles: Vec<UserRole>,
}

impl LegacyRoleGuard {
    /// Creates a guard allowing exactly the listed roles.
    pub fn new(allowed_roles: Vec<UserRole>) -> Self {
        Self { allowed_roles }
    }

    /// Checks the resolved role against the allowed list.
    ///
    /// `None` means no role could be resolved for the caller and denies
    /// outright — never defaults to a role.
    pub fn evaluate(&self, resolved_role: Option<UserRole>) -> GuardOutcome {
        match resolved_role {
            Some(role) if self.allowed_roles.contains(&role) => GuardOutcome::Allowed,
            Some(_) => GuardOutcome::Denied(
                AccessVerdict::deny(
                    "Votre rôle ne permet pas d'accéder à cette page",
                    "Your role does not grant access to this page",
                )
                .with_required_roles(self.allowed_roles.clone())
                .with_redirect(UNAUTHORIZED_PATH),
            ),
            None => GuardOutcome::Denied(
                AccessVerdict::deny("Aucun rôle résolu", "No role resolved")
                    .with_redirect(UNAUTHORIZED_PATH),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prepaccess_entity::FallbackAction;

    #[test]
    fn test_listed_role_allowed() {
        let guard = LegacyRoleGuard::new(vec![UserRole::SeniorManager, UserRole::Admin]);
        assert!(guard.evaluate(Some(UserRole::Admin)).is_allowed());
    }

    #[test]
    fn test_unlisted_role_redirects() {
        let guard = LegacyRoleGuard::new(vec![UserRole::Admin]);
        let outcome = guard.evaluate(Some(UserRole::Student));
        let verdict = outcome.verdict().unwrap();
        assert_eq!(
            verdict.fallback_action,
            Some(FallbackAction::Redirect {
                to: UNAUTHORIZED_PATH.to_string()
            })
        );
    }

    #[test]
    fn test_unresolved_role_denies_explicitly() {
        let guard = LegacyRoleGuard::new(vec![UserRole::Student]);
        let outcome = guard.evaluate(None);
        let verdict = outcome.verdict().unwrap();
        assert!(!verdict.allowed);
        assert_eq!(verdict.reason_en, "No role resolved");
    }
}
