//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Core operations fail atomically: an error means nothing was applied,
/// never a partial update.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (bad month key, negative amount, out-of-range day).
    #[error("Validation error: {0}")]
    Validation(String),

    /// State conflict (already paid, already terminated, stale version).
    #[error("State conflict: {0}")]
    StateConflict(String),

    /// Persistence boundary failure; ledger state is left unchanged.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// External service error (command extraction, etc).
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code reported to callers.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
            Self::StateConflict(_) => "STATE_CONFLICT",
            Self::Persistence(_) => "PERSISTENCE_FAILURE",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
