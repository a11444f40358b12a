//! Derived monthly views: realized totals and projected balance.
//!
//! Everything here is a pure read over the store. Derivation never
//! fails; an empty store just produces zeroed summaries.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use service::ProjectionService;
pub use types::{BillOccurrence, ForecastOccurrence, MonthlySummary};
