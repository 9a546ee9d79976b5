//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with permissive CORS and
//! per-request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use dockify_proximity::ObservationStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `POST /api/v1/location` -- append an observation
/// - `POST /api/v1/location/nearest` -- radius query
///
/// CORS allows any origin; the mobile client and the web dashboard call
/// from different hosts.
pub fn build_router<S: ObservationStore + 'static>(state: Arc<AppState<S>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/location", post(handlers::ingest_location::<S>))
        .route("/location/nearest", post(handlers::nearest_users::<S>));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
