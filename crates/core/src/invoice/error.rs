//! Invoice error types.

use lyvo_shared::AppError;
use lyvo_shared::types::{CreditCardId, MonthKey};
use rust_decimal::Decimal;
use thiserror::Error;

/// Invoice-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvoiceError {
    /// Payment amount must be positive.
    #[error("Payment amount must be positive, got {0}")]
    NonPositivePayment(Decimal),

    /// Nothing is owed on the invoice.
    #[error("Invoice for card {card} in {month} is already paid")]
    AlreadyPaid {
        /// The card whose invoice was targeted.
        card: CreditCardId,
        /// The invoice month.
        month: MonthKey,
    },

    /// Credit card not found.
    #[error("Credit card not found: {0}")]
    CardNotFound(CreditCardId),
}

impl From<InvoiceError> for AppError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::NonPositivePayment(_) => Self::Validation(err.to_string()),
            InvoiceError::AlreadyPaid { .. } => Self::StateConflict(err.to_string()),
            InvoiceError::CardNotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
