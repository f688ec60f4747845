//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use prepaccess_access::{AccessEvaluator, RolePolicies};
use prepaccess_core::config::AppConfig;

use crate::token::TokenDecoder;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Static role-policy table.
    pub policies: Arc<RolePolicies>,
    /// The access evaluator.
    pub evaluator: Arc<AccessEvaluator>,
    /// Access-token validator.
    pub token_decoder: Arc<TokenDecoder>,
}
