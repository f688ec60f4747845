//! Batch validation of declarative access rules.

mod conditions;

use std::collections::HashMap;

use prepaccess_entity::{AccessRule, AccessVerdict, UserAccessContext};

use crate::evaluator::AccessEvaluator;

impl AccessEvaluator {
    /// Evaluates a list of rules against one context, keyed by rule id.
    ///
    /// Stages per rule: role match (any-of) → tier match (any-of) → all
    /// permissions present (AND) → conditions in declaration order. The
    /// first failing stage produces the verdict; later stages — including
    /// backend-delegated custom conditions — are not evaluated.
    ///
    /// Rules are awaited sequentially; batch sizes are small and the only
    /// suspension point is a custom condition.
    pub async fn validate_access_rules(
        &self,
        ctx: &UserAccessContext,
        rules: &[AccessRule],
    ) -> HashMap<String, AccessVerdict> {
        let mut results = HashMap::with_capacity(rules.len());
        for rule in rules {
            let verdict = self.validate_rule(ctx, rule).await;
            results.insert(rule.id.clone(), verdict);
        }
        results
    }

    async fn validate_rule(&self, ctx: &UserAccessContext, rule: &AccessRule) -> AccessVerdict {
        if !rule.required_roles.is_empty() && !rule.required_roles.contains(&ctx.role) {
            return AccessVerdict::deny(
                "Votre rôle ne satisfait pas cette règle",
                "Your role does not satisfy this rule",
            )
            .with_required_roles(rule.required_roles.clone());
        }

        if !rule.required_tiers.is_empty()
            && !rule.required_tiers.contains(&ctx.subscription_tier)
        {
            return AccessVerdict::deny(
                "Votre abonnement ne satisfait pas cette règle",
                "Your subscription does not satisfy this rule",
            )
            .with_required_subscription(rule.required_tiers.clone());
        }

        let missing: Vec<_> = rule
            .required_permissions
            .iter()
            .filter(|p| !ctx.has_permission(p))
            .copied()
            .collect();
        if !missing.is_empty() {
            return AccessVerdict::deny(
                "Permissions insuffisantes pour cette règle",
                "Insufficient permissions for this rule",
            )
            .with_required_permissions(rule.required_permissions.clone());
        }

        for condition in &rule.conditions {
            let verdict = conditions::evaluate(ctx, condition, self.backend().as_ref()).await;
            if !verdict.allowed {
                return verdict;
            }
        }

        AccessVerdict::allow()
    }
}
