//! Error types for the HTTP API.
//!
//! [`ApiError`] unifies all failure modes into a single enum that can be
//! converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Every
//! error body has the shape `{"error": <message>, "status": <code>}`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dockify_proximity::ProximityError;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request body was malformed or failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The ledger or query engine rejected the operation.
    #[error(transparent)]
    Proximity(#[from] ProximityError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::InvalidRequest(errors.to_string())
    }
}

impl ApiError {
    /// HTTP status this error maps to.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Proximity(e) if e.is_validation() => StatusCode::BAD_REQUEST,
            Self::Proximity(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Proximity(ProximityError::StoreUnavailable(e)) => {
                tracing::error!(error = %e, "Request failed on store");
                String::from("store unavailable")
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use dockify_proximity::StoreError;
    use dockify_types::CoordinateError;

    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        assert_eq!(
            ApiError::from(ProximityError::InvalidRadius(0)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ProximityError::InvalidCoordinate(CoordinateError::Latitude(91.0)))
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidRequest(String::from("bad")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn store_failure_is_service_unavailable() {
        let err = ApiError::from(ProximityError::StoreUnavailable(StoreError::Connection(
            String::from("refused"),
        )));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
