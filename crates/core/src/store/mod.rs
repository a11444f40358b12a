//! Canonical entity records and their mutations.
//!
//! The store is the single writer surface of the engine: every mutation
//! is an atomic read-modify-write against one entity, validated before
//! any state is touched. Exclusive access (`&mut self`) serializes
//! writers in-process; per-entity version counters let the persistence
//! boundary detect concurrent writers across processes.

pub mod error;
pub mod service;
pub mod types;

pub use error::StoreError;
pub use service::LedgerStore;
pub use types::{
    BudgetLimit, CardCharge, CreateBudgetLimitInput, CreateCreditCardInput, CreateFixedBillInput,
    CreateForecastInput, CreateTransactionInput, CreditCard, FixedBill, Forecast, ForecastKind,
    Transaction, TransactionKind,
};
