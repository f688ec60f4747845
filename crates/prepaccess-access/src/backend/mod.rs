//! Escalation path to the upstream auth backend.
//!
//! Static table checks always run first; only checks that pass the local
//! fast path reach a backend implementation. The backend result is
//! authoritative and may further restrict access, never widen it past the
//! static tables.

pub mod http;

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use prepaccess_core::{AppError, AppResult};
use prepaccess_entity::{AccessCondition, AccessVerdict, Section, UserAccessContext};
use prepaccess_entity::Permission;

pub use http::HttpEscalationBackend;

/// Dynamic/conditional rule evaluation delegated to the auth backend.
#[async_trait]
pub trait EscalationBackend: fmt::Debug + Send + Sync {
    /// `POST /auth/check-section-access`
    async fn check_section_access(
        &self,
        ctx: &UserAccessContext,
        target: Section,
    ) -> AppResult<AccessVerdict>;

    /// `POST /auth/check-permission`
    async fn check_permission(
        &self,
        ctx: &UserAccessContext,
        permission: Permission,
        resource: Option<&str>,
    ) -> AppResult<AccessVerdict>;

    /// `POST /auth/evaluate-condition`
    async fn evaluate_condition(
        &self,
        ctx: &UserAccessContext,
        condition: &AccessCondition,
    ) -> AppResult<bool>;
}

/// Backend with canned responses and invocation counters.
///
/// Serves two purposes: offline evaluation (CLI, local development) where
/// the static tables alone decide, and tests asserting that cheap local
/// denials never incur a backend call.
#[derive(Debug)]
pub struct StaticEscalationBackend {
    section_response: Result<AccessVerdict, AppError>,
    permission_response: Result<AccessVerdict, AppError>,
    condition_response: Result<bool, AppError>,
    section_calls: AtomicUsize,
    permission_calls: AtomicUsize,
    condition_calls: AtomicUsize,
}

impl StaticEscalationBackend {
    /// A backend that approves every escalation.
    pub fn allowing() -> Self {
        Self {
            section_response: Ok(AccessVerdict::allow()),
            permission_response: Ok(AccessVerdict::allow()),
            condition_response: Ok(true),
            section_calls: AtomicUsize::new(0),
            permission_calls: AtomicUsize::new(0),
            condition_calls: AtomicUsize::new(0),
        }
    }

    /// A backend whose every call fails, for fail-closed tests.
    pub fn failing() -> Self {
        let err = || AppError::external_service("auth backend unreachable");
        Self {
            section_response: Err(err()),
            permission_response: Err(err()),
            condition_response: Err(err()),
            section_calls: AtomicUsize::new(0),
            permission_calls: AtomicUsize::new(0),
            condition_calls: AtomicUsize::new(0),
        }
    }

    /// Overrides the section-check response.
    pub fn with_section_response(mut self, response: Result<AccessVerdict, AppError>) -> Self {
        self.section_response = response;
        self
    }

    /// Overrides the permission-check response.
    pub fn with_permission_response(mut self, response: Result<AccessVerdict, AppError>) -> Self {
        self.permission_response = response;
        self
    }

    /// Overrides the condition-evaluation response.
    pub fn with_condition_response(mut self, response: Result<bool, AppError>) -> Self {
        self.condition_response = response;
        self
    }

    /// Number of section-check calls made.
    pub fn section_calls(&self) -> usize {
        self.section_calls.load(Ordering::SeqCst)
    }

    /// Number of permission-check calls made.
    pub fn permission_calls(&self) -> usize {
        self.permission_calls.load(Ordering::SeqCst)
    }

    /// Number of condition-evaluation calls made.
    pub fn condition_calls(&self) -> usize {
        self.condition_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EscalationBackend for StaticEscalationBackend {
    async fn check_section_access(
        &self,
        _ctx: &UserAccessContext,
        _target: Section,
    ) -> AppResult<AccessVerdict> {
        self.section_calls.fetch_add(1, Ordering::SeqCst);
        self.section_response.clone()
    }

    async fn check_permission(
        &self,
        _ctx: &UserAccessContext,
        _permission: Permission,
        _resource: Option<&str>,
    ) -> AppResult<AccessVerdict> {
        self.permission_calls.fetch_add(1, Ordering::SeqCst);
        self.permission_response.clone()
    }

    async fn evaluate_condition(
        &self,
        _ctx: &UserAccessContext,
        _condition: &AccessCondition,
    ) -> AppResult<bool> {
        self.condition_calls.fetch_add(1, Ordering::SeqCst);
        self.condition_response.clone()
    }
}
