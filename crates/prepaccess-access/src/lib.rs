//! Access-control engine for the PrepAccess platform.
//!
//! The engine combines a static role-policy table (permissions, section
//! access, subscription gates, feature flags) with an escalation path to
//! the upstream auth backend for dynamic rules. Every check returns an
//! [`AccessVerdict`]; no check ever fails with an error — internal and
//! network failures are converted to deny verdicts (fail closed).
//!
//! [`AccessVerdict`]: prepaccess_entity::AccessVerdict

pub mod backend;
pub mod evaluator;
pub mod guard;
pub mod policy;
pub mod rules;

pub use backend::{EscalationBackend, HttpEscalationBackend, StaticEscalationBackend};
pub use evaluator::AccessEvaluator;
pub use guard::{GuardOutcome, LegacyRoleGuard, RoleGuard};
pub use policy::{RolePolicies, RolePolicy};
