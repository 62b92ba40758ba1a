use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::dberrors::RepositoryError;

/// Main error type for the customers service
#[derive(Debug)]
pub enum ServiceError {
    // Request body could not be decoded or failed validation
    InvalidPayload(String),

    // Repository failure on create, list, get or delete
    Repository(RepositoryError),

    // Repository failure on update
    UpdateFailed(RepositoryError),

    // No route matched the request path
    RouteNotFound(String),

    // Path matched but the method is not served there
    MethodNotAllowed { method: String, path: String },
}

/// Error body sent to clients: `{"code":"<status>","message":"<text>"}`
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::InvalidPayload(msg) => write!(f, "{}", msg),
            ServiceError::Repository(err) | ServiceError::UpdateFailed(err) => {
                write!(f, "{}", err)
            }
            ServiceError::RouteNotFound(path) => write!(f, "no route for {}", path),
            ServiceError::MethodNotAllowed { method, path } => {
                write!(f, "method {} not allowed on {}", method, path)
            }
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Repository(err) | ServiceError::UpdateFailed(err) => Some(err),
            _ => None,
        }
    }
}

impl ServiceError {
    /// Get the HTTP status code for this error
    ///
    /// Body decoding failures are reported as 500, not 400. Only a failed
    /// update maps to 404, whatever the repository's reason was.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UpdateFailed(_) | ServiceError::RouteNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            ServiceError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ServiceError::InvalidPayload(_) | ServiceError::Repository(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Error kind for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::InvalidPayload(_) => "invalid_payload",
            ServiceError::Repository(err) | ServiceError::UpdateFailed(err) => err.kind(),
            ServiceError::RouteNotFound(_) => "route_not_found",
            ServiceError::MethodNotAllowed { .. } => "method_not_allowed",
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.status_code().as_u16().to_string(),
            message: self.to_string(),
        }
    }
}

/// Implement IntoResponse for Axum integration
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_error_response())).into_response()
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        ServiceError::Repository(err)
    }
}

/// Conversion from JSON body decoding errors
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::InvalidPayload(err.to_string())
    }
}

/// Conversion from validation errors
impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::InvalidPayload(err.to_string())
    }
}

/// Type alias for Results using ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
