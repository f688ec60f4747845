//! Role-to-policy mapping definitions.
//!
//! Built once at startup and shared read-only behind an `Arc`; there is no
//! mutation path — role and subscription changes happen on the platform
//! backend and reach this service through fresh request contexts.

use std::collections::{HashMap, HashSet};

use prepaccess_entity::{FeatureAccess, Permission, Section, SubscriptionTier, UserRole};

/// Feature keys known to the default table.
pub const FEATURE_LIVE_SESSIONS: &str = "live_sessions";
pub const FEATURE_AI_CHAT: &str = "ai_chat";
pub const FEATURE_MOCK_EXAMS: &str = "mock_exams";
pub const FEATURE_OFFLINE_DOWNLOADS: &str = "offline_downloads";
pub const FEATURE_WHITEBOARD: &str = "whiteboard";
pub const FEATURE_PROGRESS_TRACKING: &str = "progress_tracking";
pub const FEATURE_CONTENT_STUDIO: &str = "content_studio";
pub const FEATURE_AUDIT_REPORTS: &str = "audit_reports";

/// Policy record for one role.
#[derive(Debug, Clone)]
pub struct RolePolicy {
    /// Permissions the role carries.
    pub permissions: HashSet<Permission>,
    /// Sections the role may enter.
    pub sections: Vec<Section>,
    /// Sparse map from permission to the tiers that unlock it.
    /// Absence means the permission has no subscription gate.
    pub subscription_requirements: HashMap<Permission, Vec<SubscriptionTier>>,
    /// Feature-name to access-setting map.
    pub features: HashMap<String, FeatureAccess>,
}

/// Defines the mapping from each role to its policy.
#[derive(Debug, Clone)]
pub struct RolePolicies {
    policies: HashMap<UserRole, RolePolicy>,
}

impl RolePolicies {
    /// Creates the default policy set.
    pub fn new() -> Self {
        let mut policies = HashMap::new();

        // Student: consumes content, joins sessions, tier-gated extras
        let student = RolePolicy {
            permissions: [
                Permission::ViewContent,
                Permission::JoinLiveSessions,
                Permission::UploadFiles,
                Permission::UseAiChat,
                Permission::AccessWhiteboard,
            ]
            .into_iter()
            .collect(),
            sections: vec![Section::Student],
            subscription_requirements: HashMap::from([
                (
                    Permission::UseAiChat,
                    vec![
                        SubscriptionTier::Essential,
                        SubscriptionTier::Premium,
                        SubscriptionTier::Pro,
                    ],
                ),
                (
                    Permission::UploadFiles,
                    vec![SubscriptionTier::Premium, SubscriptionTier::Pro],
                ),
            ]),
            features: HashMap::from([
                (
                    FEATURE_LIVE_SESSIONS.to_string(),
                    FeatureAccess::Tiers(vec![SubscriptionTier::Premium, SubscriptionTier::Pro]),
                ),
                (
                    FEATURE_AI_CHAT.to_string(),
                    FeatureAccess::Tiers(vec![
                        SubscriptionTier::Essential,
                        SubscriptionTier::Premium,
                        SubscriptionTier::Pro,
                    ]),
                ),
                (
                    FEATURE_MOCK_EXAMS.to_string(),
                    FeatureAccess::Tiers(vec![
                        SubscriptionTier::Essential,
                        SubscriptionTier::Premium,
                        SubscriptionTier::Pro,
                    ]),
                ),
                (
                    FEATURE_OFFLINE_DOWNLOADS.to_string(),
                    FeatureAccess::Tiers(vec![SubscriptionTier::Pro]),
                ),
                (FEATURE_WHITEBOARD.to_string(), FeatureAccess::Enabled(true)),
                (
                    FEATURE_PROGRESS_TRACKING.to_string(),
                    FeatureAccess::Enabled(true),
                ),
            ]),
        };
        policies.insert(UserRole::Student, student);

        // Junior manager: authors content and hosts sessions.
        // Deliberately disjoint from Student on the live-session side:
        // hosts but does not join as a participant.
        let junior = RolePolicy {
            permissions: [
                Permission::ViewContent,
                Permission::CreateContent,
                Permission::EditContent,
                Permission::ViewAnalytics,
                Permission::HostLiveSessions,
                Permission::ManageFiles,
            ]
            .into_iter()
            .collect(),
            sections: vec![Section::Student, Section::Manager],
            subscription_requirements: HashMap::new(),
            features: HashMap::from([
                (
                    FEATURE_LIVE_SESSIONS.to_string(),
                    FeatureAccess::Enabled(true),
                ),
                (FEATURE_WHITEBOARD.to_string(), FeatureAccess::Enabled(true)),
                (
                    FEATURE_PROGRESS_TRACKING.to_string(),
                    FeatureAccess::Enabled(true),
                ),
                (
                    FEATURE_CONTENT_STUDIO.to_string(),
                    FeatureAccess::Enabled(true),
                ),
            ]),
        };
        policies.insert(UserRole::JuniorManager, junior.clone());

        // Senior manager: junior plus user/subscription management
        let mut senior = junior;
        senior.permissions.extend([
            Permission::DeleteContent,
            Permission::ManageUsers,
            Permission::ManageSubscriptions,
        ]);
        senior.features.insert(
            FEATURE_AUDIT_REPORTS.to_string(),
            FeatureAccess::Enabled(true),
        );
        policies.insert(UserRole::SeniorManager, senior);

        // Admin: everything
        let admin = RolePolicy {
            permissions: Permission::ALL.into_iter().collect(),
            sections: vec![Section::Student, Section::Manager, Section::Admin],
            subscription_requirements: HashMap::new(),
            features: [
                FEATURE_LIVE_SESSIONS,
                FEATURE_AI_CHAT,
                FEATURE_MOCK_EXAMS,
                FEATURE_OFFLINE_DOWNLOADS,
                FEATURE_WHITEBOARD,
                FEATURE_PROGRESS_TRACKING,
                FEATURE_CONTENT_STUDIO,
                FEATURE_AUDIT_REPORTS,
            ]
            .into_iter()
            .map(|f| (f.to_string(), FeatureAccess::Enabled(true)))
            .collect(),
        };
        policies.insert(UserRole::Admin, admin);

        Self { policies }
    }

    /// Returns the policy for the given role. Callers must fail closed on
    /// `None`.
    pub fn policy_for(&self, role: &UserRole) -> Option<&RolePolicy> {
        self.policies.get(role)
    }

    /// Checks whether the given role has the specified permission.
    pub fn has_permission(&self, role: &UserRole, permission: &Permission) -> bool {
        self.policies
            .get(role)
            .map(|p| p.permissions.contains(permission))
            .unwrap_or(false)
    }

    /// Returns the set of permissions for the given role, sorted for
    /// stable output.
    pub fn permissions_for_role(&self, role: &UserRole) -> Vec<Permission> {
        let mut perms: Vec<Permission> = self
            .policies
            .get(role)
            .map(|p| p.permissions.iter().copied().collect())
            .unwrap_or_default();
        perms.sort();
        perms
    }

    /// Returns the sections accessible to the given role.
    pub fn sections_for_role(&self, role: &UserRole) -> Vec<Section> {
        self.policies
            .get(role)
            .map(|p| p.sections.clone())
            .unwrap_or_default()
    }

    /// Roles that carry the given permission, in ascending privilege order.
    pub fn roles_with_permission(&self, permission: &Permission) -> Vec<UserRole> {
        UserRole::ALL
            .into_iter()
            .filter(|r| self.has_permission(r, permission))
            .collect()
    }

    /// Roles that may enter the given section, in ascending privilege order.
    pub fn roles_with_section(&self, section: &Section) -> Vec<UserRole> {
        UserRole::ALL
            .into_iter()
            .filter(|r| {
                self.policies
                    .get(r)
                    .map(|p| p.sections.contains(section))
                    .unwrap_or(false)
            })
            .collect()
    }
}

impl Default for RolePolicies {
    fn default() -> Self {
        Self::new()
    }
}
