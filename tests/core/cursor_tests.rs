//! Comprehensive tests for cursor-to-sample resolution
//!
//! Tests cover:
//! - Exact-lookup priority over nearest search
//! - The tolerance floor and the step/2 rule
//! - Sanitization of non-finite values
//! - The point-vs-aggregate display fallback

use serde_json::json;

use fleetscope::cursor::{display_value, resolve_cursor, DisplayValue};
use fleetscope::series::{TimeRange, TimeSeries};
use fleetscope::state::MIN_CURSOR_TOLERANCE_MS;

use crate::common::{stepped_series, telemetry_rows, test_spec};

// ============================================
// Exact-First Tests
// ============================================

#[test]
fn test_exact_hit_beats_nearest_sample() {
    // The per-second raw reading and the display aggregate disagree; a
    // cursor inside the indexed second must report the raw reading.
    let series = TimeSeries::build(
        test_spec(),
        &telemetry_rows(json!([
            {"time": 0, "avg": 10.0, "rawAvg": 10.7},
            {"time": 60, "avg": 20.0}
        ])),
    );
    let hit = resolve_cursor(&series, Some(400)).expect("exact hit");
    assert_eq!(hit.avg, 10.7);
    // Exact hits report the cursor instant, not the sample instant.
    assert_eq!(hit.time, 400);
}

#[test]
fn test_miss_falls_through_to_nearest() {
    let series = stepped_series(0, 60_000, &[1.0, 2.0, 3.0]);
    // Second 45 is not indexed; the nearest sample at 60s wins.
    let hit = resolve_cursor(&series, Some(45_000)).expect("nearest hit");
    assert_eq!(hit.time, 60_000);
    assert_eq!(hit.avg, 2.0);
}

// ============================================
// Tolerance Tests
// ============================================

#[test]
fn test_tolerance_floor_for_dense_series() {
    // 10s step: step/2 is far below the floor, so 60s applies.
    let series = stepped_series(0, 10_000, &[1.0, 2.0]);
    assert_eq!(series.tolerance_ms(), MIN_CURSOR_TOLERANCE_MS);

    let last = series.last().expect("non-empty").time;
    assert!(resolve_cursor(&series, Some(last + 60_000)).is_some());
    assert_eq!(resolve_cursor(&series, Some(last + 60_001)), None);
}

#[test]
fn test_tolerance_half_step_for_sparse_series() {
    // 10-minute step: tolerance widens to step/2 = 5 minutes.
    let series = stepped_series(0, 600_000, &[1.0, 2.0]);
    assert_eq!(series.tolerance_ms(), 300_000);

    let last = series.last().expect("non-empty").time;
    assert!(resolve_cursor(&series, Some(last + 300_000)).is_some());
    assert_eq!(resolve_cursor(&series, Some(last + 300_001)), None);
}

// ============================================
// Sanitization Tests
// ============================================

#[test]
fn test_resolved_values_are_finite() {
    let series = TimeSeries::build(
        test_spec(),
        &telemetry_rows(json!([
            {"time": 0, "avg": 5.0, "min": "bad", "max": null}
        ])),
    );
    let hit = resolve_cursor(&series, Some(0)).expect("exact hit");
    assert_eq!((hit.avg, hit.min, hit.max), (5.0, 5.0, 5.0));
}

// ============================================
// Display Fallback Tests
// ============================================

#[test]
fn test_no_cursor_shows_window_aggregate() {
    let series = stepped_series(0, 60_000, &[10.0, 20.0, 30.0]);
    match display_value(&series, None, Some(TimeRange::new(0, 70_000))) {
        DisplayValue::Aggregate(stats) => {
            assert_eq!(stats.avg, 15.0);
            assert_eq!(stats.min, 10.0);
            assert_eq!(stats.max, 20.0);
        }
        DisplayValue::Point(_) => panic!("expected aggregate without a cursor"),
    }
}

#[test]
fn test_cursor_out_of_tolerance_shows_aggregate() {
    let series = stepped_series(0, 60_000, &[10.0, 20.0]);
    // Cursor far off the data: no point resolves, panel shows the window
    // aggregate instead of going blank.
    match display_value(&series, Some(10_000_000), None) {
        DisplayValue::Aggregate(stats) => assert_eq!(stats.avg, 15.0),
        DisplayValue::Point(_) => panic!("expected aggregate for a far cursor"),
    }
}

#[test]
fn test_cursor_on_data_shows_point() {
    let series = stepped_series(0, 60_000, &[10.0, 20.0]);
    match display_value(&series, Some(60_000), None) {
        DisplayValue::Point(point) => assert_eq!(point.avg, 20.0),
        DisplayValue::Aggregate(_) => panic!("expected a point on an indexed second"),
    }
}

#[test]
fn test_empty_series_aggregates_to_zeros() {
    let series = TimeSeries::from_samples(test_spec(), vec![]);
    match display_value(&series, Some(0), None) {
        DisplayValue::Aggregate(stats) => {
            assert_eq!((stats.avg, stats.min, stats.max), (0.0, 0.0, 0.0));
        }
        DisplayValue::Point(_) => panic!("expected aggregate for an empty series"),
    }
}
