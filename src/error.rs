use crate::config::ConfigError;
use crate::mail::DispatchError;
use crate::telemetry::TelemetryError;

/// Top-level error covering startup and command-line execution paths.
///
/// Request-time failures never reach this type; the intake router maps them
/// to the `{ success, message, errors? }` response shape directly.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mail dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
}
