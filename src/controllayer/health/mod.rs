pub mod health;

pub use health::{HealthResponse, health_check, status_message};
