use axum::http::StatusCode;

/// How a failed operation should be reported to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    InvalidState,
    Validation,
    StoreFailure,
}

impl FailureKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::InvalidState => StatusCode::CONFLICT,
            FailureKind::Validation => StatusCode::BAD_REQUEST,
            FailureKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
