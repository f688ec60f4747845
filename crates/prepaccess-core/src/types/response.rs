//! Wire types shared across the HTTP surface.

use serde::{Deserialize, Serialize};

/// Error body for operational failures (bad token, malformed input,
/// unknown role).
///
/// Access denials never use this shape: check endpoints answer 200 with
/// a verdict body, which carries its own bilingual reasons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Stable machine-readable code, e.g. `UNAUTHORIZED`.
    pub error: String,
    /// Human-readable message, not localized.
    pub message: String,
}

impl ApiErrorResponse {
    /// Builds an error body from a code and message.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
