//! Recurrence error types.

use lyvo_shared::AppError;
use lyvo_shared::types::MonthKey;
use thiserror::Error;

/// Recurrence-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Target month precedes the definition's creation month.
    #[error("Month {target} precedes the definition's start month {start}")]
    BeforeStart {
        /// Target month of the operation.
        target: MonthKey,
        /// Start month of the definition.
        start: MonthKey,
    },

    /// Target month has no occurrence (one-off rule or outside recurrence).
    #[error("No occurrence exists for month {0}")]
    NoOccurrence(MonthKey),

    /// The month is already excluded.
    #[error("Month {0} is already excluded")]
    AlreadySkipped(MonthKey),

    /// The recurrence is already terminated at or before the given month.
    #[error("Recurrence already terminated from {0}")]
    AlreadyTerminated(MonthKey),
}

impl From<RecurrenceError> for AppError {
    fn from(err: RecurrenceError) -> Self {
        match err {
            RecurrenceError::BeforeStart { .. } => Self::Validation(err.to_string()),
            RecurrenceError::NoOccurrence(_) => Self::NotFound(err.to_string()),
            RecurrenceError::AlreadySkipped(_) | RecurrenceError::AlreadyTerminated(_) => {
                Self::StateConflict(err.to_string())
            }
        }
    }
}
