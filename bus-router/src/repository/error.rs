//! Repository error types.

use crate::domain::{ServiceKey, StopCode};

/// Errors from looking up stops and services.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// No stop with this code exists
    #[error("stop not found: {0}")]
    StopNotFound(StopCode),

    /// No route data for this service
    #[error("service not found: {0}")]
    ServiceNotFound(ServiceKey),

    /// Source data could not be read or parsed
    #[error("failed to load {path}: {message}")]
    Load { path: String, message: String },
}
