//! Monthly ledger & forecast engine for Lyvo.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, recurrence rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `store` - Canonical entity records and their mutations
//! - `recurrence` - Per-month materialization of recurring definitions
//! - `invoice` - Credit-card invoice aggregation with carry-forward
//! - `projection` - Realized totals and forward balance projection
//! - `budget` - Category spending against monthly limits
//! - `report` - Monthly evolution report
//! - `engine` - Facade combining the above into per-month views
//! - `command` - Contract for the external command-extraction service
//! - `persistence` - Per-user entity-set storage boundary

pub mod budget;
pub mod command;
pub mod engine;
pub mod invoice;
pub mod persistence;
pub mod projection;
pub mod recurrence;
pub mod report;
pub mod store;
