//! Domain model for the PrepAccess access-control engine.
//!
//! These types carry no behavior beyond parsing, ordering, and small
//! projections; all decision logic lives in `prepaccess-access`.

pub mod context;
pub mod feature;
pub mod permission;
pub mod role;
pub mod rule;
pub mod section;
pub mod subscription;
pub mod verdict;

pub use context::UserAccessContext;
pub use feature::FeatureAccess;
pub use permission::Permission;
pub use role::UserRole;
pub use rule::{AccessCondition, AccessRule, DeviceKind, Weekday};
pub use section::Section;
pub use subscription::SubscriptionTier;
pub use verdict::{AccessVerdict, FallbackAction};
