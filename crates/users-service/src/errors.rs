use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Request-level errors for the admin users endpoint.
///
/// Every authentication failure maps to 400 Bad Request. That mirrors the
/// behavior of the previous issuers of this token, which never distinguished
/// 401/403; callers depend on it. Only a reissue failure is a server error.
#[derive(Debug, Error)]
pub enum UsersError {
    #[error("Invalid request, missing Authorization header")]
    MissingAuthorization,

    #[error("Invalid request, invalid Authorization header")]
    InvalidAuthorization,

    #[error("Invalid request, failed to decode bearer token")]
    DecodeFailed,

    #[error("Invalid request, Unauthorized user")]
    UnauthorizedIdentity,

    #[error("Invalid request, token expired")]
    TokenExpired,

    /// The store error text is forwarded verbatim. Acceptable for an internal
    /// tool; redact before any externally-facing deployment.
    #[error("Failed to get users from store: {0}")]
    Fetch(String),

    #[error("Failed to encode token: {0}")]
    Reissue(String),
}

/// Key-value store errors, kept separate so the repository layer stays
/// independent of HTTP concerns.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    Connection(String),

    #[error("Store command error: {0}")]
    Command(String),

    #[error("Corrupt user record: {0}")]
    CorruptRecord(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for UsersError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            UsersError::MissingAuthorization => (StatusCode::BAD_REQUEST, "MISSING_AUTHORIZATION"),
            UsersError::InvalidAuthorization => (StatusCode::BAD_REQUEST, "INVALID_AUTHORIZATION"),
            UsersError::DecodeFailed => (StatusCode::BAD_REQUEST, "DECODE_FAILED"),
            UsersError::UnauthorizedIdentity => (StatusCode::BAD_REQUEST, "UNAUTHORIZED_IDENTITY"),
            UsersError::TokenExpired => (StatusCode::BAD_REQUEST, "TOKEN_EXPIRED"),
            UsersError::Fetch(_) => (StatusCode::BAD_REQUEST, "FETCH_FAILED"),
            UsersError::Reissue(_) => (StatusCode::INTERNAL_SERVER_ERROR, "REISSUE_FAILED"),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(error_response)).into_response()
    }
}
