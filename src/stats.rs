//! Windowed aggregate statistics.
//!
//! Computes the avg/min/max summary a panel shows when no cursor is active:
//! an aggregate over the samples inside the visible window, falling back to
//! the full series when the window contains none.

use crate::series::{TimeRange, TimeSeries};

/// Aggregate summary over a set of samples. All fields are finite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WindowStats {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// Compute aggregates over the samples strictly inside `range` (unpadded,
/// unlike the display fetch window).
///
/// An empty window falls back to the whole series; an empty series yields
/// `{0, 0, 0}`. Non-finite values are excluded before reduction, never
/// reduced through: `min`/`max` fall back to the valid averages when no
/// valid `min`/`max` values exist, then to 0.
pub fn compute_window_stats(series: &TimeSeries, range: Option<TimeRange>) -> WindowStats {
    let mut window: Vec<_> = match range {
        Some(range) => series
            .samples()
            .iter()
            .copied()
            .filter(|s| range.contains(s.time))
            .collect(),
        None => series.samples().to_vec(),
    };

    if window.is_empty() && !series.is_empty() {
        tracing::debug!(
            channel = %series.spec().id,
            "visible window has no samples, falling back to full series"
        );
        window = series.samples().to_vec();
    }

    let avgs: Vec<f64> = window.iter().map(|s| s.avg).filter(|v| v.is_finite()).collect();
    if avgs.is_empty() {
        return WindowStats::default();
    }

    let avg = avgs.iter().sum::<f64>() / avgs.len() as f64;
    let min = window
        .iter()
        .map(|s| s.min)
        .filter(|v| v.is_finite())
        .fold(f64::INFINITY, f64::min);
    let max = window
        .iter()
        .map(|s| s.max)
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    // min/max folds over an empty set leave the infinities in place; fall
    // back to the valid averages in that case.
    let min = if min.is_finite() {
        min
    } else {
        avgs.iter().copied().fold(f64::INFINITY, f64::min)
    };
    let max = if max.is_finite() {
        max
    } else {
        avgs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    };

    WindowStats {
        avg: if avg.is_finite() { avg } else { 0.0 },
        min: if min.is_finite() { min } else { 0.0 },
        max: if max.is_finite() { max } else { 0.0 },
    }
}
