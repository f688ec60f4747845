//! The access evaluator: pure decisions over the policy table with an
//! escalation path to the auth backend for dynamic rules.

pub mod cache;

use std::collections::BTreeMap;
use std::sync::Arc;

use prepaccess_core::config::cache::CacheConfig;
use prepaccess_entity::{
    AccessVerdict, Permission, Section, SubscriptionTier, UserAccessContext, UserRole,
};

use crate::backend::EscalationBackend;
use crate::policy::RolePolicies;

use self::cache::{VerdictCache, VerdictKey};

/// Evaluates access checks against the static policy table, escalating to
/// the auth backend where dynamic rules may apply.
///
/// Every operation returns a plain [`AccessVerdict`]; no error ever
/// propagates to the caller. Backend failures become deny verdicts with a
/// generic bilingual reason (fail closed — never default-allow on error).
#[derive(Debug, Clone)]
pub struct AccessEvaluator {
    policies: Arc<RolePolicies>,
    backend: Arc<dyn EscalationBackend>,
    cache: VerdictCache,
}

impl AccessEvaluator {
    /// Creates an evaluator over the given table and backend.
    pub fn new(
        policies: Arc<RolePolicies>,
        backend: Arc<dyn EscalationBackend>,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            policies,
            backend,
            cache: VerdictCache::new(cache_config),
        }
    }

    /// Creates an evaluator with the verdict cache disabled.
    pub fn without_cache(policies: Arc<RolePolicies>, backend: Arc<dyn EscalationBackend>) -> Self {
        Self {
            policies,
            backend,
            cache: VerdictCache::disabled(),
        }
    }

    /// Returns the underlying policy table.
    pub fn policies(&self) -> &RolePolicies {
        &self.policies
    }

    /// Checks whether the context may enter the target section.
    ///
    /// The static table is a fast-path pre-filter: a role without the
    /// section denies immediately, with no backend call. When the static
    /// check passes, the backend result is authoritative and may further
    /// restrict access.
    pub async fn check_section_access(
        &self,
        ctx: &UserAccessContext,
        target: Section,
    ) -> AccessVerdict {
        let Some(policy) = self.policies.policy_for(&ctx.role) else {
            return unknown_role_verdict();
        };

        if !policy.sections.contains(&target) {
            tracing::debug!(
                user_id = %ctx.user_id,
                role = %ctx.role,
                section = %target,
                "section denied by static table"
            );
            return AccessVerdict::deny(
                format!("Votre rôle ne permet pas d'accéder à la section {target}"),
                format!("Your role does not grant access to the {target} section"),
            )
            .with_required_roles(self.policies.roles_with_section(&target))
            .with_redirect("/");
        }

        let key = VerdictKey::section(ctx.user_id, target);
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        match self.backend.check_section_access(ctx, target).await {
            Ok(verdict) => {
                self.cache.insert(key, verdict.clone()).await;
                verdict
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %ctx.user_id,
                    section = %target,
                    error = %err,
                    "section escalation failed, denying"
                );
                AccessVerdict::deny(
                    "Erreur lors de la vérification de l'accès",
                    "Error while checking access",
                )
            }
        }
    }

    /// Checks whether the context holds a permission, optionally scoped to
    /// a resource.
    ///
    /// Order: role permission set, then the sparse subscription gate, then
    /// backend escalation for resource-scoped or dynamic rules.
    pub async fn check_permission(
        &self,
        ctx: &UserAccessContext,
        permission: Permission,
        resource: Option<&str>,
    ) -> AccessVerdict {
        let Some(policy) = self.policies.policy_for(&ctx.role) else {
            return unknown_role_verdict();
        };

        if !policy.permissions.contains(&permission) {
            return AccessVerdict::deny(
                "Votre rôle ne dispose pas de la permission requise",
                "Your role does not carry the required permission",
            )
            .with_required_roles(self.policies.roles_with_permission(&permission))
            .with_required_permissions(vec![permission]);
        }

        if let Some(tiers) = policy.subscription_requirements.get(&permission) {
            if !tiers.contains(&ctx.subscription_tier) {
                return AccessVerdict::deny(
                    "Un abonnement supérieur est requis pour cette action",
                    "A higher subscription is required for this action",
                )
                .with_required_subscription(tiers.clone())
                .with_required_permissions(vec![permission]);
            }
        }

        let key = VerdictKey::permission(ctx.user_id, permission, resource);
        if let Some(hit) = self.cache.get(&key).await {
            return hit;
        }

        match self.backend.check_permission(ctx, permission, resource).await {
            Ok(verdict) => {
                self.cache.insert(key, verdict.clone()).await;
                verdict
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %ctx.user_id,
                    permission = %permission,
                    error = %err,
                    "permission escalation failed, denying"
                );
                AccessVerdict::deny(
                    "Erreur lors de la vérification des permissions",
                    "Error while checking permissions",
                )
            }
        }
    }

    /// Checks whether the context may use a product feature.
    ///
    /// Purely local — feature checks never escalate to the backend.
    pub async fn check_feature_access(
        &self,
        ctx: &UserAccessContext,
        feature: &str,
    ) -> AccessVerdict {
        let Some(policy) = self.policies.policy_for(&ctx.role) else {
            return unknown_role_verdict();
        };

        match policy.features.get(feature) {
            None => AccessVerdict::deny(
                "Cette fonctionnalité n'est pas disponible",
                "This feature is not available",
            ),
            Some(access) if access.allows(&ctx.subscription_tier) => AccessVerdict::allow(),
            Some(access) => match access.required_tiers() {
                Some(tiers) => AccessVerdict::deny(
                    "Un abonnement supérieur est requis pour cette fonctionnalité",
                    "A higher subscription is required for this feature",
                )
                .with_required_subscription(tiers.to_vec()),
                // Enabled(false): off for the role regardless of tier
                None => AccessVerdict::deny(
                    "Cette fonctionnalité n'est pas disponible",
                    "This feature is not available",
                ),
            },
        }
    }

    /// Sections the role may enter. Pure table projection, no I/O.
    pub fn accessible_sections(&self, role: &UserRole) -> Vec<Section> {
        self.policies.sections_for_role(role)
    }

    /// Permissions the role carries, sorted. Pure table projection.
    pub fn role_permissions(&self, role: &UserRole) -> Vec<Permission> {
        self.policies.permissions_for_role(role)
    }

    /// Resolves every feature of the role against a concrete tier.
    ///
    /// Used for rendering decisions (navigation menus, disabled buttons)
    /// without running full checks.
    pub fn feature_matrix(
        &self,
        role: &UserRole,
        tier: &SubscriptionTier,
    ) -> BTreeMap<String, bool> {
        self.policies
            .policy_for(role)
            .map(|policy| {
                policy
                    .features
                    .iter()
                    .map(|(name, access)| (name.clone(), access.allows(tier)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn backend(&self) -> &Arc<dyn EscalationBackend> {
        &self.backend
    }
}

fn unknown_role_verdict() -> AccessVerdict {
    AccessVerdict::deny("Rôle non reconnu", "Role not recognized")
}
