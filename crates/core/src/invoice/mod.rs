//! Credit-card invoices: billing cycles, installments, and payments.
//!
//! Invoices are never stored. Each one is derived from the card's
//! transactions plus the per-month payment record, so the paid total is
//! the only invoice state that can ever go stale. Unpaid residuals roll
//! into the next month's invoice as its previous balance.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::InvoiceError;
pub use service::InvoiceService;
pub use types::{CardInvoice, InvoiceLine, InvoicePayments, PaymentReceipt};
