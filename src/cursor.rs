//! Cursor-to-sample resolution.
//!
//! Resolves the representative sample for a channel at the shared selected
//! time. Exact per-second lookup is tried first: the per-minute display
//! series may not contain the scrubbed second, but the per-second source
//! usually does, and a true reading must win over a nearby neighbor. Only
//! then does the tolerance-bounded nearest lookup run. The two lookups have
//! different correctness criteria and are kept as explicit ordered
//! strategies, not folded into one fuzzy search.

use crate::series::{Instant, Sample, TimeRange, TimeSeries};
use crate::stats::{compute_window_stats, WindowStats};

/// A resolved cursor point with all values sanitized to finite numbers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplaySample {
    pub time: Instant,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Resolve the sample for `series` at the shared cursor.
///
/// Returns `None` for a `None` cursor, an empty series, or a cursor farther
/// than the series tolerance from any sample — the "no data at this
/// instant" condition, which the UI reports rather than treats as a fault.
pub fn resolve_cursor(series: &TimeSeries, cursor: Option<Instant>) -> Option<DisplaySample> {
    let cursor = cursor?;
    if series.is_empty() {
        return None;
    }
    if let Some(hit) = series.exact_at(cursor) {
        // Exact hits are reported at the cursor instant itself.
        return Some(sanitize(cursor, hit));
    }
    let hit = series.nearest_at(cursor, series.tolerance_ms())?;
    Some(sanitize(hit.time, hit))
}

/// What a panel displays for the current cursor and visible window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DisplayValue {
    /// The cursor resolved to a concrete sample.
    Point(DisplaySample),
    /// No cursor (or no data at the cursor): aggregate over the window.
    Aggregate(WindowStats),
}

/// The display rule shared by all panels: the cursor point when one
/// resolves, else the window aggregate.
pub fn display_value(
    series: &TimeSeries,
    cursor: Option<Instant>,
    range: Option<TimeRange>,
) -> DisplayValue {
    match resolve_cursor(series, cursor) {
        Some(point) => DisplayValue::Point(point),
        None => DisplayValue::Aggregate(compute_window_stats(series, range)),
    }
}

fn sanitize(time: Instant, sample: Sample) -> DisplaySample {
    let avg = if sample.avg.is_finite() { sample.avg } else { 0.0 };
    let min = if sample.min.is_finite() { sample.min } else { avg };
    let max = if sample.max.is_finite() { sample.max } else { avg };
    DisplaySample {
        time,
        avg,
        min,
        max,
    }
}
