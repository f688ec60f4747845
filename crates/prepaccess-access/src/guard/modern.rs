//! The modern requirements-bundle guard.

use prepaccess_entity::{
    AccessVerdict, Permission, Section, SubscriptionTier, UserAccessContext, UserRole,
};

use crate::evaluator::AccessEvaluator;

use super::GuardOutcome;

/// A request-time gate combining any mix of role, subscription, section,
/// permission, and feature requirements.
///
/// Evaluation order is fixed: role → subscription → section → each
/// permission in declaration order → feature, short-circuiting at the
/// first denial. The first failing check's verdict is surfaced unchanged.
#[derive(Debug, Clone, Default)]
pub struct RoleGuard {
    required_role: Option<UserRole>,
    required_subscription: Option<SubscriptionTier>,
    required_section: Option<Section>,
    required_permissions: Vec<Permission>,
    required_feature: Option<String>,
}

impl RoleGuard {
    /// An empty guard that allows everyone; combine with the builder
    /// methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate on student privileges or higher.
    pub fn student() -> Self {
        Self::new().require_role(UserRole::Student)
    }

    /// Gate on junior-manager privileges or higher.
    pub fn manager() -> Self {
        Self::new().require_role(UserRole::JuniorManager)
    }

    /// Gate on admin privileges.
    pub fn admin() -> Self {
        Self::new().require_role(UserRole::Admin)
    }

    /// Gate on a minimum subscription tier.
    pub fn subscription(tier: SubscriptionTier) -> Self {
        Self::new().require_subscription(tier)
    }

    /// Gate on a product feature.
    pub fn feature(name: impl Into<String>) -> Self {
        Self::new().require_feature(name)
    }

    /// Require at least the given role (privilege-order comparison).
    pub fn require_role(mut self, role: UserRole) -> Self {
        self.required_role = Some(role);
        self
    }

    /// Require at least the given subscription tier.
    pub fn require_subscription(mut self, tier: SubscriptionTier) -> Self {
        self.required_subscription = Some(tier);
        self
    }

    /// Require access to the given section.
    pub fn require_section(mut self, section: Section) -> Self {
        self.required_section = Some(section);
        self
    }

    /// Require a permission; may be called repeatedly.
    pub fn require_permission(mut self, permission: Permission) -> Self {
        self.required_permissions.push(permission);
        self
    }

    /// Require a product feature.
    pub fn require_feature(mut self, name: impl Into<String>) -> Self {
        self.required_feature = Some(name.into());
        self
    }

    /// Runs the checks in order against the context.
    pub async fn evaluate(
        &self,
        evaluator: &AccessEvaluator,
        ctx: &UserAccessContext,
    ) -> GuardOutcome {
        if let Some(minimum) = &self.required_role {
            if !ctx.role.has_at_least(minimum) {
                let satisfying: Vec<UserRole> = UserRole::ALL
                    .into_iter()
                    .filter(|r| r.has_at_least(minimum))
                    .collect();
                return GuardOutcome::Denied(
                    AccessVerdict::deny(
                        "Votre rôle ne permet pas d'accéder à ce contenu",
                        "Your role does not grant access to this content",
                    )
                    .with_required_roles(satisfying)
                    .with_redirect("/"),
                );
            }
        }

        if let Some(minimum) = &self.required_subscription {
            if !ctx.subscription_tier.satisfies(minimum) {
                let satisfying: Vec<SubscriptionTier> = SubscriptionTier::ALL
                    .into_iter()
                    .filter(|t| t.satisfies(minimum))
                    .collect();
                return GuardOutcome::Denied(
                    AccessVerdict::deny(
                        "Un abonnement supérieur est requis pour accéder à ce contenu",
                        "A higher subscription is required to access this content",
                    )
                    .with_required_subscription(satisfying),
                );
            }
        }

        if let Some(section) = self.required_section {
            let verdict = evaluator.check_section_access(ctx, section).await;
            if !verdict.allowed {
                return GuardOutcome::Denied(verdict);
            }
        }

        for permission in &self.required_permissions {
            let verdict = evaluator.check_permission(ctx, *permission, None).await;
            if !verdict.allowed {
                return GuardOutcome::Denied(verdict);
            }
        }

        if let Some(feature) = &self.required_feature {
            let verdict = evaluator.check_feature_access(ctx, feature).await;
            if !verdict.allowed {
                return GuardOutcome::Denied(verdict);
            }
        }

        GuardOutcome::Allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::StaticEscalationBackend;
    use crate::policy::RolePolicies;
    use std::sync::Arc;
    use uuid::Uuid;

    fn evaluator(backend: Arc<StaticEscalationBackend>) -> AccessEvaluator {
        AccessEvaluator::without_cache(Arc::new(RolePolicies::new()), backend)
    }

    fn ctx(role: UserRole, tier: SubscriptionTier) -> UserAccessContext {
        let policies = RolePolicies::new();
        UserAccessContext::new(
            Uuid::new_v4(),
            role,
            tier,
            policies.permissions_for_role(&role),
        )
    }

    #[tokio::test]
    async fn test_admin_passes_section_guard_with_backend_approval() {
        let backend = Arc::new(StaticEscalationBackend::allowing());
        let evaluator = evaluator(backend);
        let guard = RoleGuard::new().require_section(Section::Admin);

        let outcome = guard
            .evaluate(&evaluator, &ctx(UserRole::Admin, SubscriptionTier::Free))
            .await;

        assert!(outcome.is_allowed());
    }

    #[tokio::test]
    async fn test_free_student_denied_live_sessions_feature() {
        let evaluator = evaluator(Arc::new(StaticEscalationBackend::allowing()));
        let guard = RoleGuard::feature("live_sessions");

        let outcome = guard
            .evaluate(&evaluator, &ctx(UserRole::Student, SubscriptionTier::Free))
            .await;

        let verdict = outcome.verdict().expect("should be denied");
        assert_eq!(
            verdict.required_subscription,
            Some(vec![SubscriptionTier::Premium, SubscriptionTier::Pro])
        );
        assert_eq!(verdict.upgrade_url.as_deref(), Some("/abonnement"));
    }

    #[tokio::test]
    async fn test_junior_manager_denied_manage_users_locally() {
        let backend = Arc::new(StaticEscalationBackend::allowing());
        let evaluator = evaluator(backend.clone());
        let guard = RoleGuard::new().require_permission(Permission::ManageUsers);

        let outcome = guard
            .evaluate(
                &evaluator,
                &ctx(UserRole::JuniorManager, SubscriptionTier::Pro),
            )
            .await;

        let verdict = outcome.verdict().expect("should be denied");
        assert_eq!(
            verdict.required_role,
            Some(vec![UserRole::SeniorManager, UserRole::Admin])
        );
        assert_eq!(backend.permission_calls(), 0);
    }

    #[tokio::test]
    async fn test_role_check_precedes_all_others() {
        // A failing role requirement must short-circuit before any
        // escalating check runs.
        let backend = Arc::new(StaticEscalationBackend::allowing());
        let evaluator = evaluator(backend.clone());
        let guard = RoleGuard::admin()
            .require_section(Section::Manager)
            .require_permission(Permission::ViewContent);

        let outcome = guard
            .evaluate(&evaluator, &ctx(UserRole::Student, SubscriptionTier::Pro))
            .await;

        assert!(!outcome.is_allowed());
        assert_eq!(backend.section_calls(), 0);
        assert_eq!(backend.permission_calls(), 0);
    }

    #[tokio::test]
    async fn test_first_failing_permission_wins() {
        let evaluator = evaluator(Arc::new(StaticEscalationBackend::allowing()));
        let guard = RoleGuard::new()
            .require_permission(Permission::ManageUsers)
            .require_permission(Permission::ManageSubscriptions);

        let outcome = guard
            .evaluate(&evaluator, &ctx(UserRole::Student, SubscriptionTier::Pro))
            .await;

        let verdict = outcome.verdict().expect("should be denied");
        // The surfaced verdict names the first failing permission only
        assert_eq!(
            verdict.required_permissions,
            Some(vec![Permission::ManageUsers])
        );
    }

    #[tokio::test]
    async fn test_subscription_convenience_guard() {
        let evaluator = evaluator(Arc::new(StaticEscalationBackend::allowing()));
        let guard = RoleGuard::subscription(SubscriptionTier::Premium);

        let denied = guard
            .evaluate(
                &evaluator,
                &ctx(UserRole::Student, SubscriptionTier::Essential),
            )
            .await;
        let allowed = guard
            .evaluate(&evaluator, &ctx(UserRole::Student, SubscriptionTier::Pro))
            .await;

        assert!(!denied.is_allowed());
        assert!(allowed.is_allowed());
        assert_eq!(
            denied.verdict().unwrap().required_subscription,
            Some(vec![SubscriptionTier::Premium, SubscriptionTier::Pro])
        );
    }
}
