//! Store error types.

use lyvo_shared::AppError;
use lyvo_shared::types::{
    BudgetLimitId, CreditCardId, FixedBillId, ForecastId, TransactionId,
};
use thiserror::Error;

/// Store-related errors.
///
/// A store error always means nothing was applied.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// Fixed bill not found.
    #[error("Fixed bill not found: {0}")]
    BillNotFound(FixedBillId),

    /// Credit card not found.
    #[error("Credit card not found: {0}")]
    CardNotFound(CreditCardId),

    /// Forecast not found.
    #[error("Forecast not found: {0}")]
    ForecastNotFound(ForecastId),

    /// Budget limit not found.
    #[error("Budget limit not found: {0}")]
    BudgetLimitNotFound(BudgetLimitId),

    /// Amount cannot be negative.
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(rust_decimal::Decimal),

    /// Day of month out of range.
    #[error("{field} must be 1-31, got {value}")]
    DayOutOfRange {
        /// Which day field was invalid.
        field: &'static str,
        /// The rejected value.
        value: u32,
    },

    /// Installment count below one.
    #[error("Installments must be >= 1, got {0}")]
    InvalidInstallments(u32),

    /// A required text field was empty.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// Optimistic version check failed.
    #[error("Stale version: expected {expected}, found {found}")]
    VersionMismatch {
        /// Version the caller read.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },

    /// A budget limit for the category already exists.
    #[error("Budget limit already exists for category {0:?}")]
    DuplicateCategory(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::TransactionNotFound(_)
            | StoreError::BillNotFound(_)
            | StoreError::CardNotFound(_)
            | StoreError::ForecastNotFound(_)
            | StoreError::BudgetLimitNotFound(_) => Self::NotFound(err.to_string()),
            StoreError::NegativeAmount(_)
            | StoreError::DayOutOfRange { .. }
            | StoreError::InvalidInstallments(_)
            | StoreError::EmptyField(_) => Self::Validation(err.to_string()),
            StoreError::VersionMismatch { .. } | StoreError::DuplicateCategory(_) => {
                Self::StateConflict(err.to_string())
            }
        }
    }
}
