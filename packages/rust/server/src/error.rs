//! JSON error responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}` with a status
//! that separates missing topics from bad input and server-side failures.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use topicshelf_shared::TopicshelfError;

/// An error body plus the status it is sent with.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl ApiError {
    pub fn internal(message: &'static str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }

    /// Map a core error, using `internal_message` for anything that is not
    /// the caller's fault.
    pub fn from_core(err: TopicshelfError, internal_message: &'static str) -> Self {
        match err {
            TopicshelfError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: "Topic not found",
            },
            TopicshelfError::InvalidPath { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid topic path",
            },
            other => {
                warn!(error = %other, "request failed");
                Self::internal(internal_message)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
