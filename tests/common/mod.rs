//! Common test utilities shared across all test modules
//!
//! This module provides helpers for deserializing raw API rows from inline
//! JSON, building synthetic series/tracks, and float comparisons.
#![allow(dead_code)]

use fleetscope::ingest::{GpsRow, TelemetryRow};
use fleetscope::series::{ChannelSpec, Instant, Sample, TimeSeries};
use fleetscope::track::{GpsPoint, GpsTrack};

/// Install a test subscriber so debug-level drop/fallback logs show up
/// under `cargo test -- --nocapture`. Safe to call from multiple tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Deserialize telemetry rows from a `json!` array value.
pub fn telemetry_rows(value: serde_json::Value) -> Vec<TelemetryRow> {
    serde_json::from_value(value).expect("telemetry rows should deserialize")
}

/// Deserialize GPS rows from a `json!` array value.
pub fn gps_rows(value: serde_json::Value) -> Vec<GpsRow> {
    serde_json::from_value(value).expect("gps rows should deserialize")
}

/// A channel spec for a generic test channel.
pub fn test_spec() -> ChannelSpec {
    ChannelSpec::new("eng_temp", "Engine Temp", "°C").with_y_range(0.0, 150.0)
}

/// A series of single-value samples at a fixed step, starting at `start`.
pub fn stepped_series(start: Instant, step_ms: i64, values: &[f64]) -> TimeSeries {
    let samples = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Sample::point(start + i as i64 * step_ms, v))
        .collect();
    TimeSeries::from_samples(test_spec(), samples)
}

/// A GPS track with fixes at the given instants (coordinates derived from
/// the index so each fix is distinguishable).
pub fn fixed_track(times: &[Instant]) -> GpsTrack {
    let points = times
        .iter()
        .enumerate()
        .map(|(i, &t)| GpsPoint {
            time: t,
            lat: i as f64,
            lng: -(i as f64),
        })
        .collect();
    GpsTrack::from_points(points)
}

/// Float comparison helpers for testing
pub mod float_cmp {
    /// Check if two floats are approximately equal within a tolerance
    pub fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() < tolerance
    }

    /// Assert that two floats are approximately equal
    pub fn assert_approx_eq(a: f64, b: f64, tolerance: f64) {
        assert!(
            approx_eq(a, b, tolerance),
            "Values not approximately equal: {} vs {} (tolerance: {})",
            a,
            b,
            tolerance
        );
    }

    /// Default tolerance for float comparisons (0.0001)
    pub const DEFAULT_TOLERANCE: f64 = 0.0001;
}
