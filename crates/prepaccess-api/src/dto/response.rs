//! Response bodies for the access endpoints.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use prepaccess_entity::{AccessVerdict, Permission, Section, SubscriptionTier, UserRole};

/// Response of `GET /api/access/sections/{role}`.
#[derive(Debug, Serialize)]
pub struct RoleSectionsResponse {
    /// The queried role.
    pub role: UserRole,
    /// Sections the role may enter.
    pub sections: Vec<Section>,
}

/// Response of `GET /api/access/permissions/{role}`.
#[derive(Debug, Serialize)]
pub struct RolePermissionsResponse {
    /// The queried role.
    pub role: UserRole,
    /// Permissions the role carries.
    pub permissions: Vec<Permission>,
}

/// Response of `GET /api/access/features`.
#[derive(Debug, Serialize)]
pub struct FeatureMatrixResponse {
    /// Role the matrix was resolved for.
    pub role: UserRole,
    /// Tier the matrix was resolved against.
    pub tier: SubscriptionTier,
    /// Feature-name to resolved-access map.
    pub features: BTreeMap<String, bool>,
}

/// Response of `POST /api/access/rules`.
#[derive(Debug, Serialize)]
pub struct RulesValidationResponse {
    /// Per-rule verdicts, keyed by rule id.
    pub results: HashMap<String, AccessVerdict>,
}

/// Response of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status, always `"ok"` when reachable.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
}
