//! Static role-policy configuration.

pub mod table;

pub use table::{RolePolicies, RolePolicy};
