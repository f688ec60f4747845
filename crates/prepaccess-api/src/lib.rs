//! HTTP surface for the PrepAccess engine.
//!
//! Exposes the evaluator's checks and projections under `/api`, with a
//! JWT extractor building a fresh [`UserAccessContext`] per request.
//!
//! [`UserAccessContext`]: prepaccess_entity::UserAccessContext

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod token;

pub use app::{build_app, build_state, build_state_with_backend};
pub use state::AppState;
