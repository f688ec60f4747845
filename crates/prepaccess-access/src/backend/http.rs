//! reqwest implementation of the escalation backend.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use prepaccess_core::config::backend::BackendConfig;
use prepaccess_core::{AppError, AppResult};
use prepaccess_entity::{
    AccessCondition, AccessVerdict, Permission, Section, SubscriptionTier, UserAccessContext,
    UserRole,
};

use super::EscalationBackend;

/// JSON client against the upstream auth backend.
///
/// Every request carries the configured per-request timeout; a timeout or
/// transport error surfaces as `ExternalService` and is converted to a
/// deny verdict by the evaluator.
#[derive(Debug, Clone)]
pub struct HttpEscalationBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Body of `POST /auth/check-section-access`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionCheckRequest<'a> {
    user_id: uuid::Uuid,
    target_section: Section,
    current_context: &'a UserAccessContext,
}

/// Body of `POST /auth/check-permission`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionCheckRequest<'a> {
    user_id: uuid::Uuid,
    permission: Permission,
    #[serde(skip_serializing_if = "Option::is_none")]
    resource: Option<&'a str>,
    current_context: &'a UserAccessContext,
}

/// Body of `POST /auth/evaluate-condition`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConditionRequest<'a> {
    user_context: &'a UserAccessContext,
    condition: &'a AccessCondition,
}

/// Verdict payload as the platform backend serializes it (camelCase).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackendVerdict {
    allowed: bool,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    reason_en: Option<String>,
    #[serde(default)]
    required_role: Option<Vec<UserRole>>,
    #[serde(default)]
    required_subscription: Option<Vec<SubscriptionTier>>,
    #[serde(default)]
    required_permissions: Option<Vec<Permission>>,
    #[serde(default)]
    upgrade_url: Option<String>,
}

impl From<BackendVerdict> for AccessVerdict {
    fn from(wire: BackendVerdict) -> Self {
        let mut verdict = if wire.allowed {
            AccessVerdict::allow()
        } else {
            AccessVerdict::deny(
                wire.reason
                    .clone()
                    .unwrap_or_else(|| "Accès refusé".to_string()),
                wire.reason_en
                    .clone()
                    .unwrap_or_else(|| "Access denied".to_string()),
            )
        };
        verdict.required_role = wire.required_role;
        verdict.required_subscription = wire.required_subscription;
        verdict.required_permissions = wire.required_permissions;
        verdict.upgrade_url = wire.upgrade_url;
        verdict
    }
}

/// Response of `POST /auth/evaluate-condition`.
#[derive(Debug, Deserialize)]
struct ConditionResponse {
    allowed: bool,
}

impl HttpEscalationBackend {
    /// Builds the client from configuration.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        if let Some(token) = &config.service_token {
            let value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| {
                    AppError::configuration(format!("Invalid backend service token: {e}"))
                })?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post_json<B: Serialize, R: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<R> {
        let url = format!("{}{path}", self.base_url);
        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Auth backend returned {status} for {path}"
            )));
        }

        Ok(response.json::<R>().await?)
    }
}

#[async_trait]
impl EscalationBackend for HttpEscalationBackend {
    async fn check_section_access(
        &self,
        ctx: &UserAccessContext,
        target: Section,
    ) -> AppResult<AccessVerdict> {
        let body = SectionCheckRequest {
            user_id: ctx.user_id,
            target_section: target,
            current_context: ctx,
        };
        let wire: BackendVerdict = self.post_json("/auth/check-section-access", &body).await?;
        Ok(wire.into())
    }

    async fn check_permission(
        &self,
        ctx: &UserAccessContext,
        permission: Permission,
        resource: Option<&str>,
    ) -> AppResult<AccessVerdict> {
        let body = PermissionCheckRequest {
            user_id: ctx.user_id,
            permission,
            resource,
            current_context: ctx,
        };
        let wire: BackendVerdict = self.post_json("/auth/check-permission", &body).await?;
        Ok(wire.into())
    }

    async fn evaluate_condition(
        &self,
        ctx: &UserAccessContext,
        condition: &AccessCondition,
    ) -> AppResult<bool> {
        let body = ConditionRequest {
            user_context: ctx,
            condition,
        };
        let response: ConditionResponse = self.post_json("/auth/evaluate-condition", &body).await?;
        Ok(response.allowed)
    }
}
