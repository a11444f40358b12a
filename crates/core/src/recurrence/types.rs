//! Recurrence domain types.

use std::collections::BTreeSet;

use lyvo_shared::types::MonthKey;
use serde::{Deserialize, Serialize};

/// The immutable recurrence rule of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// The month the definition was created in (or anchored to).
    pub start_month: MonthKey,
    /// Whether the definition repeats every month from `start_month` onward.
    /// Non-recurring definitions materialize only in their start month.
    pub is_recurring: bool,
}

impl RecurrenceRule {
    /// A recurring rule starting at the given month.
    #[must_use]
    pub const fn monthly(start_month: MonthKey) -> Self {
        Self {
            start_month,
            is_recurring: true,
        }
    }

    /// A one-off rule for the given month only.
    #[must_use]
    pub const fn once(start_month: MonthKey) -> Self {
        Self {
            start_month,
            is_recurring: false,
        }
    }
}

/// Per-month overrides of a recurrence rule.
///
/// The base rule stays pure and auditable; everything month-specific
/// (paid/confirmed markers, ONLY_THIS exclusions, the ALL_FUTURE
/// termination point) lives here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceOverrides {
    /// Months whose occurrence has been settled (bill paid / forecast
    /// confirmed).
    pub settled: BTreeSet<MonthKey>,
    /// Months excluded by an ONLY_THIS deletion.
    pub skipped: BTreeSet<MonthKey>,
    /// First month of an ALL_FUTURE deletion; occurrences at or after this
    /// month no longer exist. History before it is preserved.
    pub terminated_from: Option<MonthKey>,
}

/// Status of a materialized occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OccurrenceStatus {
    /// Not yet paid / confirmed.
    Pending,
    /// Paid (bills) or confirmed (forecasts) for the month.
    Settled,
}

impl OccurrenceStatus {
    /// Returns true for a settled occurrence.
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Settled)
    }
}

/// The materialization of a recurring definition for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    /// The month this occurrence belongs to.
    pub month: MonthKey,
    /// Settled or pending.
    pub status: OccurrenceStatus,
}
