//! REST endpoint handlers.
//!
//! Handlers are generic over the [`ObservationStore`] so the same router
//! serves the `PostgreSQL` store in production and the in-memory store in
//! tests. Bodies are parsed and validated here; the core only ever sees
//! typed values.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/health` | Liveness probe |
//! | `POST` | `/api/v1/location` | Append one observation |
//! | `POST` | `/api/v1/location/nearest` | Users within a radius, closest first |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dockify_proximity::ObservationStore;
use dockify_types::{
    CreatedObservationResponse, EntityId, IngestLocationRequest, NearbyUserResponse,
    NearestUsersRequest,
};
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe. Always answers `"health"`.
pub async fn health() -> Json<&'static str> {
    Json("health")
}

// ---------------------------------------------------------------------------
// POST /api/v1/location
// ---------------------------------------------------------------------------

/// Append one location observation for a user.
///
/// Returns `201 Created` with the assigned observation id.
pub async fn ingest_location<S: ObservationStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<IngestLocationRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let id = state
        .ledger()
        .append(
            EntityId::new(request.user_id),
            request.location.latitude,
            request.location.longitude,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedObservationResponse { id })))
}

// ---------------------------------------------------------------------------
// POST /api/v1/location/nearest
// ---------------------------------------------------------------------------

/// Find the users within `radius` meters of the given point.
///
/// The requesting user is never part of the answer. Zero matches is
/// `204 No Content` rather than an empty array.
pub async fn nearest_users<S: ObservationStore>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<NearestUsersRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let nearby = state
        .engine()
        .query(
            request.latitude,
            request.longitude,
            request.radius,
            EntityId::new(request.user_id),
        )
        .await?;

    if nearby.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let users: Vec<NearbyUserResponse> = nearby.iter().map(NearbyUserResponse::from).collect();
    Ok(Json(users).into_response())
}
