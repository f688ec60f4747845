//! Core building blocks shared by every PrepAccess crate: the unified
//! error type, configuration schemas, and common response types.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
