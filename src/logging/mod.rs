pub mod telemetry;

pub use telemetry::{LogFormat, TelemetryConfig, init_telemetry, shutdown_telemetry};
