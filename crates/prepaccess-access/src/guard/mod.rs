//! Request-time gates over the evaluator.
//!
//! Two distinct guard types selected explicitly by the caller — the
//! legacy flat role-list check and the modern requirements bundle. There
//! is no runtime mode detection.

pub mod legacy;
pub mod modern;

pub use legacy::LegacyRoleGuard;
pub use modern::RoleGuard;

use prepaccess_entity::AccessVerdict;

/// Result of a guard evaluation.
///
/// The UI's `LOADING → (ALLOWED | DENIED)` machine maps onto the pending
/// future and this enum: callers hold their content until the future
/// resolves, then render either the protected content or the denial
/// verdict.
#[derive(Debug, Clone)]
pub enum GuardOutcome {
    /// Render the protected content.
    Allowed,
    /// Surface the first failing check's verdict.
    Denied(AccessVerdict),
}

impl GuardOutcome {
    /// Whether access was granted.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The denial verdict, if denied.
    pub fn verdict(&self) -> Option<&AccessVerdict> {
        match self {
            Self::Allowed => None,
            Self::Denied(verdict) => Some(verdict),
        }
    }
}
