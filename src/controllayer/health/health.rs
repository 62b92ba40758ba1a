use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};

/// Health check response: `{"code":"200","message":"Version x.y.z OK"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub code: String,
    pub message: String,
}

/// Fixed status text reported by the health endpoint
pub fn status_message() -> String {
    format!("Version {} OK", env!("CARGO_PKG_VERSION"))
}

/// Health check endpoint handler, always 200 while the process serves requests
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        code: StatusCode::OK.as_u16().to_string(),
        message: status_message(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let response = health_check().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_status_message_carries_version() {
        assert_eq!(status_message(), "Version 0.0.1 OK");
    }
}
