//! Route definitions for the PrepAccess HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(access_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Access checks and table projections
fn access_routes() -> Router<AppState> {
    Router::new()
        .route("/access/section", post(handlers::access::check_section))
        .route(
            "/access/permission",
            post(handlers::access::check_permission),
        )
        .route("/access/feature", post(handlers::access::check_feature))
        .route("/access/rules", post(handlers::access::validate_rules))
        .route(
            "/access/sections/{role}",
            get(handlers::access::role_sections),
        )
        .route(
            "/access/permissions/{role}",
            get(handlers::access::role_permissions),
        )
        .route("/access/features", get(handlers::access::feature_matrix))
}

/// Health probe
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
