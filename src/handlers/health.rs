use crate::controllayer::health;
use axum::response::IntoResponse;
use tracing::{info, instrument};

/// GET /health
#[instrument(fields(service = "health_check"))]
pub async fn health_check() -> impl IntoResponse {
    info!("Health check request received");
    health::health_check().await
}
