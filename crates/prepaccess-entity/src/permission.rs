//! Platform permission enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named capability, independent of subscription tier.
///
/// Flat set, no hierarchy. Which roles carry which permissions is defined
/// by the policy table in `prepaccess-access`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// View published course content.
    ViewContent,
    /// Author new course content.
    CreateContent,
    /// Edit existing course content.
    EditContent,
    /// Delete course content.
    DeleteContent,
    /// Create, update, and deactivate user accounts.
    ManageUsers,
    /// Change user subscription assignments.
    ManageSubscriptions,
    /// View engagement and progress analytics.
    ViewAnalytics,
    /// Host live video sessions.
    HostLiveSessions,
    /// Join live video sessions.
    JoinLiveSessions,
    /// Upload files (homework, recordings).
    UploadFiles,
    /// Manage the shared file library.
    ManageFiles,
    /// Use the AI conversation assistant.
    UseAiChat,
    /// Use the collaborative whiteboard.
    AccessWhiteboard,
}

impl Permission {
    /// All permissions.
    pub const ALL: [Permission; 13] = [
        Self::ViewContent,
        Self::CreateContent,
        Self::EditContent,
        Self::DeleteContent,
        Self::ManageUsers,
        Self::ManageSubscriptions,
        Self::ViewAnalytics,
        Self::HostLiveSessions,
        Self::JoinLiveSessions,
        Self::UploadFiles,
        Self::ManageFiles,
        Self::UseAiChat,
        Self::AccessWhiteboard,
    ];

    /// Return the permission as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewContent => "view_content",
            Self::CreateContent => "create_content",
            Self::EditContent => "edit_content",
            Self::DeleteContent => "delete_content",
            Self::ManageUsers => "manage_users",
            Self::ManageSubscriptions => "manage_subscriptions",
            Self::ViewAnalytics => "view_analytics",
            Self::HostLiveSessions => "host_live_sessions",
            Self::JoinLiveSessions => "join_live_sessions",
            Self::UploadFiles => "upload_files",
            Self::ManageFiles => "manage_files",
            Self::UseAiChat => "use_ai_chat",
            Self::AccessWhiteboard => "access_whiteboard",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Permission {
    type Err = prepaccess_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| {
                prepaccess_core::AppError::validation(format!("Invalid permission: '{s}'"))
            })
    }
}
