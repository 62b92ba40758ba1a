use axum::{extract::Request, middleware::Next, response::Response};

use crate::middleware::request_id::get_request_id;

/// Logs every request that ends with a client or server error status
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let request_id = get_request_id(&request).map(|id| id.to_string());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    if response.status().is_server_error() {
        tracing::error!(
            status = %response.status(),
            request_id = ?request_id,
            method = %method,
            path = %path,
            "Request failed"
        );
    } else if response.status().is_client_error() {
        tracing::warn!(
            status = %response.status(),
            request_id = ?request_id,
            method = %method,
            path = %path,
            "Request rejected"
        );
    }

    response
}
