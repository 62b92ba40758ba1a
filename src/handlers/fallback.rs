use axum::{
    http::{Method, Uri},
    response::IntoResponse,
};
use tracing::warn;

use crate::errors::errors::ServiceError;

/// Any path outside the routing table
pub async fn route_not_found(uri: Uri) -> impl IntoResponse {
    warn!(path = %uri.path(), "No route matched");
    ServiceError::RouteNotFound(uri.path().to_string())
}

/// A known path asked for with a method it does not serve
pub async fn method_not_allowed(method: Method, uri: Uri) -> impl IntoResponse {
    warn!(method = %method, path = %uri.path(), "Method not allowed");
    ServiceError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
