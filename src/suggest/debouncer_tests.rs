//! Tests for the refresh debouncer

use super::*;
use proptest::prelude::*;

const TEST_DELAY_MS: u64 = 1000;

fn at(t0: Instant, offset_ms: u64) -> Instant {
    t0 + Duration::from_millis(offset_ms)
}

#[test]
fn test_new_debouncer_has_no_pending() {
    let debouncer = Debouncer::new(TEST_DELAY_MS);
    assert!(!debouncer.has_pending());
    assert!(!debouncer.is_ready_at(Instant::now()));
    assert_eq!(debouncer.delay_ms(), TEST_DELAY_MS);
}

#[test]
fn test_schedule_sets_pending() {
    let mut debouncer = Debouncer::new(TEST_DELAY_MS);
    debouncer.schedule_at(Instant::now());
    assert!(debouncer.has_pending());
}

#[test]
fn test_not_ready_before_window_closes() {
    let mut debouncer = Debouncer::new(TEST_DELAY_MS);
    let t0 = Instant::now();
    debouncer.schedule_at(t0);
    assert!(!debouncer.is_ready_at(t0));
    assert!(!debouncer.is_ready_at(at(t0, TEST_DELAY_MS - 1)));
}

#[test]
fn test_ready_once_window_closes() {
    let mut debouncer = Debouncer::new(TEST_DELAY_MS);
    let t0 = Instant::now();
    debouncer.schedule_at(t0);
    assert!(debouncer.is_ready_at(at(t0, TEST_DELAY_MS)));
    assert!(debouncer.is_ready_at(at(t0, TEST_DELAY_MS + 500)));
}

#[test]
fn test_reschedule_restarts_window() {
    let mut debouncer = Debouncer::new(TEST_DELAY_MS);
    let t0 = Instant::now();

    debouncer.schedule_at(t0);
    debouncer.schedule_at(at(t0, 500));

    // Only half the window has passed since the reschedule
    assert!(!debouncer.is_ready_at(at(t0, TEST_DELAY_MS)));
    assert!(debouncer.is_ready_at(at(t0, TEST_DELAY_MS + 500)));
}

#[test]
fn test_mark_complete_clears_state() {
    let mut debouncer = Debouncer::new(TEST_DELAY_MS);
    let t0 = Instant::now();
    debouncer.schedule_at(t0);
    assert!(debouncer.is_ready_at(at(t0, TEST_DELAY_MS)));

    debouncer.mark_complete();
    assert!(!debouncer.has_pending());
    assert!(!debouncer.is_ready_at(at(t0, TEST_DELAY_MS)));
}

#[test]
fn test_default_uses_default_window() {
    let debouncer = Debouncer::default();
    assert_eq!(debouncer.delay_ms(), DEFAULT_DEBOUNCE_MS);
    assert!(!debouncer.has_pending());
}

// Property: for any burst of edits, readiness is measured from the
// final edit, and exactly one evaluation becomes due.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_burst_measures_from_last_edit(
        num_inputs in 1usize..=10,
        gap_ms in 1u64..=50,
    ) {
        let mut debouncer = Debouncer::new(TEST_DELAY_MS);
        let t0 = Instant::now();

        let mut last = t0;
        for i in 0..num_inputs {
            last = at(t0, gap_ms * i as u64);
            debouncer.schedule_at(last);
        }

        prop_assert!(debouncer.has_pending());
        prop_assert!(!debouncer.is_ready_at(last + Duration::from_millis(TEST_DELAY_MS - 1)));
        prop_assert!(debouncer.is_ready_at(last + Duration::from_millis(TEST_DELAY_MS)));
    }
}

// Property: schedule/ready/complete cycles always end quiet
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_state_consistency(num_cycles in 1usize..=5) {
        let mut debouncer = Debouncer::new(TEST_DELAY_MS);
        let t0 = Instant::now();
        let mut now = t0;

        for _ in 0..num_cycles {
            debouncer.schedule_at(now);
            prop_assert!(debouncer.has_pending());

            now += Duration::from_millis(TEST_DELAY_MS + 10);
            prop_assert!(debouncer.is_ready_at(now));

            debouncer.mark_complete();
            prop_assert!(!debouncer.has_pending());
            prop_assert!(!debouncer.is_ready_at(now));
        }
    }
}
