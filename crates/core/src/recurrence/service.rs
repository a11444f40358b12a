//! Recurrence resolution and override mutations.

use lyvo_shared::types::MonthKey;

use super::error::RecurrenceError;
use super::types::{Occurrence, OccurrenceStatus, RecurrenceOverrides, RecurrenceRule};

/// Recurrence service.
///
/// `resolve` is a pure function over the rule and its overrides; the
/// mutation helpers update the override set atomically for one target
/// month and validate before touching any state.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Materializes the occurrence of a definition for the target month,
    /// if one exists.
    ///
    /// An occurrence exists when the target month is at or after the start
    /// month (exactly the start month for one-off rules), no termination
    /// marker is in effect at or before it, and it is not excluded.
    #[must_use]
    pub fn resolve(
        rule: &RecurrenceRule,
        overrides: &RecurrenceOverrides,
        target: MonthKey,
    ) -> Option<Occurrence> {
        if target < rule.start_month {
            return None;
        }
        if !rule.is_recurring && target != rule.start_month {
            return None;
        }
        if let Some(from) = overrides.terminated_from {
            if target >= from {
                return None;
            }
        }
        if overrides.skipped.contains(&target) {
            return None;
        }

        let status = if overrides.settled.contains(&target) {
            OccurrenceStatus::Settled
        } else {
            OccurrenceStatus::Pending
        };
        Some(Occurrence {
            month: target,
            status,
        })
    }

    /// Toggles the settled marker for the target month's occurrence.
    ///
    /// Returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::NoOccurrence` if no occurrence exists for
    /// the month.
    pub fn toggle_settled(
        rule: &RecurrenceRule,
        overrides: &mut RecurrenceOverrides,
        target: MonthKey,
    ) -> Result<OccurrenceStatus, RecurrenceError> {
        Self::require_occurrence(rule, overrides, target)?;
        if overrides.settled.remove(&target) {
            Ok(OccurrenceStatus::Pending)
        } else {
            overrides.settled.insert(target);
            Ok(OccurrenceStatus::Settled)
        }
    }

    /// Marks the target month's occurrence settled (confirm).
    ///
    /// Idempotent: settling an already-settled occurrence is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::NoOccurrence` if no occurrence exists for
    /// the month.
    pub fn settle(
        rule: &RecurrenceRule,
        overrides: &mut RecurrenceOverrides,
        target: MonthKey,
    ) -> Result<(), RecurrenceError> {
        Self::require_occurrence(rule, overrides, target)?;
        overrides.settled.insert(target);
        Ok(())
    }

    /// Excludes the target month only (ONLY_THIS deletion).
    ///
    /// The settled marker for that month, if any, is dropped with it.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::NoOccurrence` if no occurrence exists, or
    /// `RecurrenceError::AlreadySkipped` if the month is already excluded.
    pub fn skip(
        rule: &RecurrenceRule,
        overrides: &mut RecurrenceOverrides,
        target: MonthKey,
    ) -> Result<(), RecurrenceError> {
        if overrides.skipped.contains(&target) {
            return Err(RecurrenceError::AlreadySkipped(target));
        }
        Self::require_occurrence(rule, overrides, target)?;
        overrides.skipped.insert(target);
        overrides.settled.remove(&target);
        Ok(())
    }

    /// Terminates the recurrence from the target month onward (ALL_FUTURE
    /// deletion).
    ///
    /// Settled and skip markers strictly before the termination month are
    /// preserved; markers at or after it are dropped.
    ///
    /// # Errors
    ///
    /// Returns `RecurrenceError::BeforeStart` if the target precedes the
    /// start month, or `RecurrenceError::AlreadyTerminated` if an earlier
    /// (or equal) termination already exists.
    pub fn terminate(
        rule: &RecurrenceRule,
        overrides: &mut RecurrenceOverrides,
        target: MonthKey,
    ) -> Result<(), RecurrenceError> {
        if target < rule.start_month {
            return Err(RecurrenceError::BeforeStart {
                target,
                start: rule.start_month,
            });
        }
        if let Some(existing) = overrides.terminated_from {
            if existing <= target {
                return Err(RecurrenceError::AlreadyTerminated(existing));
            }
        }
        overrides.terminated_from = Some(target);
        overrides.settled = overrides
            .settled
            .iter()
            .copied()
            .filter(|m| *m < target)
            .collect();
        overrides.skipped = overrides
            .skipped
            .iter()
            .copied()
            .filter(|m| *m < target)
            .collect();
        Ok(())
    }

    fn require_occurrence(
        rule: &RecurrenceRule,
        overrides: &RecurrenceOverrides,
        target: MonthKey,
    ) -> Result<(), RecurrenceError> {
        if target < rule.start_month {
            return Err(RecurrenceError::BeforeStart {
                target,
                start: rule.start_month,
            });
        }
        if Self::resolve(rule, overrides, target).is_none() {
            return Err(RecurrenceError::NoOccurrence(target));
        }
        Ok(())
    }
}
