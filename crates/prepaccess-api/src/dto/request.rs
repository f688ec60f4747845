//! Request bodies for the access endpoints.

use serde::Deserialize;
use validator::Validate;

use prepaccess_entity::{AccessRule, Permission, Section, SubscriptionTier};

/// Body of `POST /api/access/section`.
#[derive(Debug, Deserialize)]
pub struct SectionCheckRequest {
    /// Section the caller wants to enter.
    pub target_section: Section,
}

/// Body of `POST /api/access/permission`.
#[derive(Debug, Deserialize, Validate)]
pub struct PermissionCheckRequest {
    /// Permission to check.
    pub permission: Permission,
    /// Optional resource scope forwarded to the backend.
    #[validate(length(max = 256))]
    pub resource: Option<String>,
}

/// Body of `POST /api/access/feature`.
#[derive(Debug, Deserialize, Validate)]
pub struct FeatureCheckRequest {
    /// Feature key to check.
    #[validate(length(min = 1, max = 64))]
    pub feature: String,
}

/// Body of `POST /api/access/rules`.
#[derive(Debug, Deserialize, Validate)]
pub struct RulesValidationRequest {
    /// Rules to evaluate against the caller's context.
    #[validate(length(min = 1, max = 50))]
    pub rules: Vec<AccessRule>,
}

/// Query of `GET /api/access/features`.
#[derive(Debug, Deserialize)]
pub struct FeatureMatrixQuery {
    /// Tier to resolve against; defaults to the caller's own tier.
    pub tier: Option<SubscriptionTier>,
}
