//! # API Error Mapping
//!
//! Turns [`AtomSpaceError`] and extractor rejections into the JSON error
//! body shared by every endpoint.
//!
//! | kind | status |
//! |------|--------|
//! | `invalid_input` | 400 |
//! | `atom_not_found`, `link_not_found`, `missing_atom`, `agent_not_found` | 404 |
//! | `conflict` | 409 |
//! | anything else | 500 |

use super::types::ErrorResponse;
use atomspace_core::AtomSpaceError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

/// Handler error: an [`AtomSpaceError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub AtomSpaceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AtomSpaceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AtomSpaceError::AtomNotFound(_)
            | AtomSpaceError::LinkNotFound(_)
            | AtomSpaceError::MissingAtom(_)
            | AtomSpaceError::AgentNotFound(_) => StatusCode::NOT_FOUND,
            AtomSpaceError::Conflict(_) => StatusCode::CONFLICT,
            AtomSpaceError::Config(_) | AtomSpaceError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<AtomSpaceError> for ApiError {
    fn from(err: AtomSpaceError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AtomSpaceError::InvalidInput(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(AtomSpaceError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AtomSpaceError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.0.kind(), "Request failed: {}", self.0);
        } else {
            tracing::warn!(kind = self.0.kind(), "Request rejected: {}", self.0);
        }
        (status, Json(ErrorResponse::from_error(&self.0))).into_response()
    }
}

/// Response for a handler that panicked. Used by `CatchPanicLayer`.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(event = "handler_panic", "Handler panicked: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal("Internal server error")),
    )
        .into_response()
}

// =============================================================================
// TESTS
// =============================================================================
