//! Per-month materialization of recurring definitions.
//!
//! Fixed bills and forecasts share the same recurrence model: a base rule
//! (anchor month + recurring flag) that is never mutated, plus an override
//! table keyed by month (settled markers, single-month exclusions, and an
//! all-future termination marker). Resolution is a pure function over the
//! rule and its overrides; mutations only touch the override table.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::RecurrenceError;
pub use service::RecurrenceService;
pub use types::{Occurrence, OccurrenceStatus, RecurrenceOverrides, RecurrenceRule};
