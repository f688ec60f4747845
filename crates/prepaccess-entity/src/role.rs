//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available on the platform.
///
/// Roles are ordered by privilege level:
/// Admin > SeniorManager > JuniorManager > Student. The privilege order is
/// used for minimum-role guard checks only; the permission table is not a
/// strict lattice (junior-manager and student permission sets are disjoint
/// in places).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Learner preparing for the TCF/TEF exams.
    Student,
    /// Content author and live-session host.
    JuniorManager,
    /// Junior manager plus user and subscription management.
    SeniorManager,
    /// Full platform administrator.
    Admin,
}

impl UserRole {
    /// All roles, in ascending privilege order.
    pub const ALL: [UserRole; 4] = [
        Self::Student,
        Self::JuniorManager,
        Self::SeniorManager,
        Self::Admin,
    ];

    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Admin => 4,
            Self::SeniorManager => 3,
            Self::JuniorManager => 2,
            Self::Student => 1,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &UserRole) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Check if this role is a manager role or higher.
    pub fn is_manager_or_above(&self) -> bool {
        self.has_at_least(&Self::JuniorManager)
    }

    /// Return the role as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "STUDENT",
            Self::JuniorManager => "JUNIOR_MANAGER",
            Self::SeniorManager => "SENIOR_MANAGER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = prepaccess_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "STUDENT" => Ok(Self::Student),
            "JUNIOR_MANAGER" => Ok(Self::JuniorManager),
            "SENIOR_MANAGER" => Ok(Self::SeniorManager),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(prepaccess_core::AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: STUDENT, JUNIOR_MANAGER, SENIOR_MANAGER, ADMIN"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privilege_ordering() {
        assert!(UserRole::Admin.has_at_least(&UserRole::Student));
        assert!(UserRole::Admin.has_at_least(&UserRole::Admin));
        assert!(UserRole::SeniorManager.has_at_least(&UserRole::JuniorManager));
        assert!(!UserRole::Student.has_at_least(&UserRole::JuniorManager));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!(
            "junior_manager".parse::<UserRole>().unwrap(),
            UserRole::JuniorManager
        );
        assert!("SUPERVISOR".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_wire_serialization() {
        let json = serde_json::to_string(&UserRole::SeniorManager).unwrap();
        assert_eq!(json, "\"SENIOR_MANAGER\"");
    }
}
