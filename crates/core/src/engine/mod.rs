//! The ledger engine facade.
//!
//! `LedgerEngine` is the single entry point callers use: it owns the
//! store and the engine configuration, exposes every mutation, and
//! derives the composed month view the product renders.

pub mod service;
pub mod types;

pub use service::LedgerEngine;
pub use types::{CardInvoiceView, DeleteMode, MonthView};
