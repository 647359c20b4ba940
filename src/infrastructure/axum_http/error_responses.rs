use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::application::{
    errors::FailureKind,
    usecases::{
        drivers::DriverError, parking_lots::ParkingLotError,
        ticket_lifecycle::TicketLifecycleError,
    },
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    fn from_kind(kind: FailureKind, message: String) -> Self {
        match kind {
            FailureKind::NotFound => ApiError::NotFound(message),
            FailureKind::InvalidState => ApiError::Conflict(message),
            FailureKind::Validation => ApiError::BadRequest(message),
            FailureKind::StoreFailure => ApiError::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TicketLifecycleError> for ApiError {
    fn from(err: TicketLifecycleError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string())
    }
}

impl From<ParkingLotError> for ApiError {
    fn from(err: ParkingLotError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string())
    }
}

impl From<DriverError> for ApiError {
    fn from(err: DriverError) -> Self {
        ApiError::from_kind(err.kind(), err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Internal causes are logged by the use case and never sent to the client.
        let status = self.status_code();
        let body = Json(ErrorResponse {
            status: "error",
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}
