//! Health endpoint.

use axum::Json;

use crate::dto::response::HealthResponse;

/// `GET /api/health` — liveness probe, unauthenticated.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
