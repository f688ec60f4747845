//! Access check and projection handlers.
//!
//! Check endpoints always answer 200 with the verdict body — the decision
//! is the resource; denial is data, not an HTTP error.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use validator::Validate;

use prepaccess_core::AppError;
use prepaccess_entity::{AccessVerdict, UserRole};

use crate::dto::request::{
    FeatureCheckRequest, FeatureMatrixQuery, PermissionCheckRequest, RulesValidationRequest,
    SectionCheckRequest,
};
use crate::dto::response::{
    FeatureMatrixResponse, RolePermissionsResponse, RoleSectionsResponse, RulesValidationResponse,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// `POST /api/access/section`
pub async fn check_section(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<SectionCheckRequest>,
) -> Json<AccessVerdict> {
    let verdict = state
        .evaluator
        .check_section_access(auth.context(), body.target_section)
        .await;
    Json(verdict)
}

/// `POST /api/access/permission`
pub async fn check_permission(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<PermissionCheckRequest>,
) -> Result<Json<AccessVerdict>, ApiError> {
    body.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;
    let verdict = state
        .evaluator
        .check_permission(auth.context(), body.permission, body.resource.as_deref())
        .await;
    Ok(Json(verdict))
}

/// `POST /api/access/feature`
pub async fn check_feature(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<FeatureCheckRequest>,
) -> Result<Json<AccessVerdict>, ApiError> {
    body.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;
    let verdict = state
        .evaluator
        .check_feature_access(auth.context(), &body.feature)
        .await;
    Ok(Json(verdict))
}

/// `POST /api/access/rules`
pub async fn validate_rules(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<RulesValidationRequest>,
) -> Result<Json<RulesValidationResponse>, ApiError> {
    body.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;
    let results = state
        .evaluator
        .validate_access_rules(auth.context(), &body.rules)
        .await;
    Ok(Json(RulesValidationResponse { results }))
}

/// `GET /api/access/sections/{role}`
pub async fn role_sections(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(role): Path<String>,
) -> Result<Json<RoleSectionsResponse>, ApiError> {
    let role = UserRole::from_str(&role).map_err(ApiError)?;
    Ok(Json(RoleSectionsResponse {
        role,
        sections: state.evaluator.accessible_sections(&role),
    }))
}

/// `GET /api/access/permissions/{role}`
pub async fn role_permissions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(role): Path<String>,
) -> Result<Json<RolePermissionsResponse>, ApiError> {
    let role = UserRole::from_str(&role).map_err(ApiError)?;
    Ok(Json(RolePermissionsResponse {
        role,
        permissions: state.evaluator.role_permissions(&role),
    }))
}

/// `GET /api/access/features` — the caller's own feature matrix, used to
/// build navigation without running full checks.
pub async fn feature_matrix(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<FeatureMatrixQuery>,
) -> Json<FeatureMatrixResponse> {
    let tier = query.tier.unwrap_or(auth.subscription_tier);
    Json(FeatureMatrixResponse {
        role: auth.role,
        tier,
        features: state.evaluator.feature_matrix(&auth.role, &tier),
    })
}
