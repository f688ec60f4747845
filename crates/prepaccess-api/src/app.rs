//! Application builder — wires the evaluator, token decoder, and router
//! into a runnable Axum app.

use std::sync::Arc;

use axum::Router;

use prepaccess_access::{AccessEvaluator, EscalationBackend, HttpEscalationBackend, RolePolicies};
use prepaccess_core::AppResult;
use prepaccess_core::config::AppConfig;

use crate::router::build_router;
use crate::state::AppState;
use crate::token::TokenDecoder;

/// Builds the shared application state from configuration.
///
/// The escalation backend is the configured HTTP client; tests build
/// their state directly with a canned backend instead.
pub fn build_state(config: AppConfig) -> AppResult<AppState> {
    let backend: Arc<dyn EscalationBackend> =
        Arc::new(HttpEscalationBackend::new(&config.backend)?);
    Ok(build_state_with_backend(config, backend))
}

/// Builds the state over an explicit escalation backend.
pub fn build_state_with_backend(
    config: AppConfig,
    backend: Arc<dyn EscalationBackend>,
) -> AppState {
    let policies = Arc::new(RolePolicies::new());
    let evaluator = Arc::new(AccessEvaluator::new(
        Arc::clone(&policies),
        backend,
        &config.cache,
    ));
    let token_decoder = Arc::new(TokenDecoder::new(&config.auth));

    AppState {
        config: Arc::new(config),
        policies,
        evaluator,
        token_decoder,
    }
}

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
