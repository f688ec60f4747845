//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! validates it, and builds a fresh per-request access context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::DateTime;

use prepaccess_core::AppError;
use prepaccess_entity::UserAccessContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// The context is rebuilt on every request from the token claims and
/// request headers, so role or tier changes take effect as soon as a new
/// token is presented.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserAccessContext);

impl AuthUser {
    /// Returns the inner `UserAccessContext`.
    pub fn context(&self) -> &UserAccessContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = UserAccessContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Extract Bearer token from Authorization header
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError(AppError::unauthorized("Missing Authorization header")))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            ApiError(AppError::unauthorized("Invalid Authorization header format"))
        })?;

        let claims = state.token_decoder.decode(token)?;

        // Effective permissions come from the static table for the role
        let permissions = state.policies.permissions_for_role(&claims.role);

        let mut ctx = UserAccessContext::new(claims.sub, claims.role, claims.tier, permissions);
        ctx.login_time = DateTime::from_timestamp(claims.iat, 0);
        if let Some(locale) = claims.locale {
            ctx.locale = locale;
        }

        if let Some(ip) = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
        {
            ctx.ip_address = Some(ip.to_string());
        }
        if let Some(ua) = parts
            .headers
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
        {
            ctx.user_agent = Some(ua.to_string());
        }
        if let Some(country) = parts
            .headers
            .get("x-country")
            .and_then(|v| v.to_str().ok())
        {
            ctx.country = Some(country.to_string());
        }

        Ok(AuthUser(ctx))
    }
}
