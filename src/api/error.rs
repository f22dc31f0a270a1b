//! HTTP error responses.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::ServiceError;

/// JSON body for messages and errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
    /// Underlying error detail, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    /// Message without detail.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }
}

/// Error returned by handlers: a status code plus a [`MessageResponse`] body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: MessageResponse,
}

impl ApiError {
    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: MessageResponse::new(message),
        }
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: MessageResponse::new(message),
        }
    }

    /// Attach an error detail to the body.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.body.error = Some(detail.into());
        self
    }

    /// Map a service error. `failure` is the message used for storage failures.
    pub fn from_service(err: ServiceError, failure: &str) -> Self {
        match err {
            ServiceError::Validation(message) => Self::bad_request(message),
            ServiceError::NotFound(message) => Self::not_found(message),
            ServiceError::Storage(e) => {
                error!("{}: {}", failure, e);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: MessageResponse::new(failure),
                }
                .with_detail(e.to_string())
            }
        }
    }

    /// Response status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
