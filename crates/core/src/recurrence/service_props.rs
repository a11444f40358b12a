//! Property-based tests for recurrence resolution.

use lyvo_shared::types::MonthKey;
use proptest::prelude::*;

use super::service::RecurrenceService;
use super::types::{OccurrenceStatus, RecurrenceOverrides, RecurrenceRule};

fn month_strategy() -> impl Strategy<Value = MonthKey> {
    (2000i32..2100, 1u32..=12).prop_map(|(y, m)| MonthKey::new(y, m).unwrap())
}

fn offset_strategy() -> impl Strategy<Value = u32> {
    0u32..120
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A recurring definition has an occurrence for every month at or
    /// after its start month when no overrides exist.
    #[test]
    fn prop_recurring_exists_from_start(
        start in month_strategy(),
        offset in offset_strategy(),
    ) {
        let rule = RecurrenceRule::monthly(start);
        let overrides = RecurrenceOverrides::default();
        let target = start.add_months(offset);

        let occ = RecurrenceService::resolve(&rule, &overrides, target);
        prop_assert!(occ.is_some());
        prop_assert_eq!(occ.unwrap().status, OccurrenceStatus::Pending);
    }

    /// No occurrence ever exists before the start month.
    #[test]
    fn prop_nothing_before_start(
        start in month_strategy(),
        offset in 1u32..120,
    ) {
        let rule = RecurrenceRule::monthly(start);
        let overrides = RecurrenceOverrides::default();
        let mut target = start;
        for _ in 0..offset {
            target = target.prev();
        }

        prop_assert!(RecurrenceService::resolve(&rule, &overrides, target).is_none());
    }

    /// Terminating at M1 removes every occurrence at or after M1 and
    /// leaves every occurrence (and settled marker) before M1 untouched.
    #[test]
    fn prop_terminate_splits_history(
        start in month_strategy(),
        settle_offsets in proptest::collection::btree_set(0u32..60, 0..8),
        terminate_offset in 0u32..60,
        probe_offset in 0u32..120,
    ) {
        let rule = RecurrenceRule::monthly(start);
        let mut overrides = RecurrenceOverrides::default();
        for off in &settle_offsets {
            RecurrenceService::settle(&rule, &mut overrides, start.add_months(*off)).unwrap();
        }
        let before = overrides.clone();
        let cut = start.add_months(terminate_offset);
        RecurrenceService::terminate(&rule, &mut overrides, cut).unwrap();

        let probe = start.add_months(probe_offset);
        let resolved = RecurrenceService::resolve(&rule, &overrides, probe);
        if probe >= cut {
            prop_assert!(resolved.is_none());
        } else {
            let expected = RecurrenceService::resolve(&rule, &before, probe);
            prop_assert_eq!(resolved, expected);
        }
    }

    /// Settling is idempotent: a second settle never changes the override
    /// set or the resolved status.
    #[test]
    fn prop_settle_idempotent(
        start in month_strategy(),
        offset in offset_strategy(),
    ) {
        let rule = RecurrenceRule::monthly(start);
        let mut overrides = RecurrenceOverrides::default();
        let target = start.add_months(offset);

        RecurrenceService::settle(&rule, &mut overrides, target).unwrap();
        let once = overrides.clone();
        RecurrenceService::settle(&rule, &mut overrides, target).unwrap();
        prop_assert_eq!(&overrides, &once);

        let occ = RecurrenceService::resolve(&rule, &overrides, target).unwrap();
        prop_assert_eq!(occ.status, OccurrenceStatus::Settled);
    }

    /// A failed mutation leaves the override set unchanged.
    #[test]
    fn prop_failed_mutation_is_atomic(
        start in month_strategy(),
        offset in 1u32..60,
    ) {
        let rule = RecurrenceRule::monthly(start);
        let mut overrides = RecurrenceOverrides::default();
        let mut before_start = start;
        for _ in 0..offset {
            before_start = before_start.prev();
        }

        let snapshot = overrides.clone();
        prop_assert!(RecurrenceService::settle(&rule, &mut overrides, before_start).is_err());
        prop_assert!(RecurrenceService::skip(&rule, &mut overrides, before_start).is_err());
        prop_assert!(RecurrenceService::terminate(&rule, &mut overrides, before_start).is_err());
        prop_assert_eq!(&overrides, &snapshot);
    }
}
