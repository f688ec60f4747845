//! Top-level UI section enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse-grained UI area a user may enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    /// Learner-facing pages: courses, exercises, live sessions.
    Student,
    /// Content and session management dashboards.
    Manager,
    /// Platform administration.
    Admin,
}

impl Section {
    /// All sections.
    pub const ALL: [Section; 3] = [Self::Student, Self::Manager, Self::Admin];

    /// Return the section as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Section {
    type Err = prepaccess_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(prepaccess_core::AppError::validation(format!(
                "Invalid section: '{s}'. Expected one of: student, manager, admin"
            ))),
        }
    }
}
