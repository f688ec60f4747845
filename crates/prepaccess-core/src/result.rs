//! Result alias used across the workspace.

use crate::error::AppError;

/// Convenience alias: every fallible operation returns `AppResult<T>`.
pub type AppResult<T> = Result<T, AppError>;
