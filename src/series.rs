//! Ordered per-second telemetry samples for one analog channel.
//!
//! A [`TimeSeries`] is built once per data load from raw API rows and never
//! mutated afterward. Alongside the display samples it maintains an
//! exact-second index keyed by epoch second, which preserves the per-second
//! source values even when the display series is coarser; point queries try
//! the index before falling back to a tolerance-bounded nearest lookup.

use std::collections::HashMap;

use crate::ingest::{self, TelemetryRow};
use crate::state::{MIN_CURSOR_TOLERANCE_MS, RANGE_PAD_MS};

/// A single point in time as a millisecond epoch integer.
pub type Instant = i64;

/// An inclusive `[start, end]` instant pair: the visible zoom/scrub window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Instant,
    pub end: Instant,
}

impl TimeRange {
    pub fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    /// Whether `instant` falls inside the range (inclusive on both ends).
    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// One telemetry reading: average/min/max values at an instant.
///
/// Invariant after build: all three values are finite, with `min` and `max`
/// defaulting to `avg` when the source omitted them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub time: Instant,
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

impl Sample {
    pub fn new(time: Instant, avg: f64, min: f64, max: f64) -> Self {
        Self {
            time,
            avg,
            min,
            max,
        }
    }

    /// A single-value reading (`avg = min = max`).
    pub fn point(time: Instant, value: f64) -> Self {
        Self::new(time, value, value, value)
    }
}

/// Channel identity and display metadata carried by a series.
#[derive(Clone, Debug)]
pub struct ChannelSpec {
    /// Stable channel identifier (sensor id).
    pub id: String,
    /// Display name for the panel header.
    pub name: String,
    /// Unit label (e.g. "°C", "kPa", "V").
    pub unit: String,
    /// Line color for this channel.
    pub color: [u8; 3],
    /// Fixed y-axis range as (min, max).
    pub y_range: (f64, f64),
}

impl ChannelSpec {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            unit: unit.into(),
            color: crate::state::channel_color(0),
            y_range: (0.0, 100.0),
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }
}

impl Default for ChannelSpec {
    fn default() -> Self {
        Self::new("", "", "")
    }
}

/// An ordered, immutable collection of samples for one channel, plus the
/// exact-second index for point queries.
///
/// Input rows are assumed chronological (the backends emit them that way);
/// their order is preserved as-is.
#[derive(Clone, Debug, Default)]
pub struct TimeSeries {
    spec: ChannelSpec,
    samples: Vec<Sample>,
    exact: HashMap<i64, Sample>,
}

impl TimeSeries {
    /// Build a series from raw API rows.
    ///
    /// Rows without a finite average (after the `avg`/`value` fallback
    /// chain) or without a resolvable timestamp are dropped; missing or
    /// non-finite `min`/`max` coerce to the row's average. The exact-second
    /// index is filled from the per-second `rawAvg`/`rawMin`/`rawMax`
    /// variants where present, else from the display values.
    pub fn build(spec: ChannelSpec, rows: &[TelemetryRow]) -> Self {
        let baseline = rows
            .iter()
            .find_map(TelemetryRow::absolute_time)
            .map(ingest::day_start_ms)
            .unwrap_or(0);

        let mut samples = Vec::with_capacity(rows.len());
        let mut exact = HashMap::with_capacity(rows.len());
        let mut dropped = 0usize;

        for row in rows {
            let (Some(time), Some(avg)) = (row.resolved_time(baseline), row.display_avg()) else {
                dropped += 1;
                continue;
            };
            let min = row.display_min().unwrap_or(avg);
            let max = row.display_max().unwrap_or(avg);
            samples.push(Sample::new(time, avg, min, max));

            if let Some(exact_avg) = row.exact_avg() {
                let entry = Sample::new(
                    time,
                    exact_avg,
                    row.exact_min().unwrap_or(exact_avg),
                    row.exact_max().unwrap_or(exact_avg),
                );
                exact.insert(time.div_euclid(1000), entry);
            }
        }

        if dropped > 0 {
            tracing::debug!(
                channel = %spec.id,
                dropped,
                kept = samples.len(),
                "dropped telemetry rows without usable time/value"
            );
        }

        Self {
            spec,
            samples,
            exact,
        }
    }

    /// Build a series from already-normalized samples (e.g. a computed
    /// channel). Samples with a non-finite average are dropped; each kept
    /// sample is indexed at its own epoch second.
    pub fn from_samples(spec: ChannelSpec, samples: Vec<Sample>) -> Self {
        let mut kept = Vec::with_capacity(samples.len());
        let mut exact = HashMap::with_capacity(samples.len());
        for mut sample in samples {
            if !sample.avg.is_finite() {
                continue;
            }
            if !sample.min.is_finite() {
                sample.min = sample.avg;
            }
            if !sample.max.is_finite() {
                sample.max = sample.avg;
            }
            exact.insert(sample.time.div_euclid(1000), sample);
            kept.push(sample);
        }
        Self {
            spec,
            samples: kept,
            exact,
        }
    }

    pub fn spec(&self) -> &ChannelSpec {
        &self.spec
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Number of entries in the exact-second index.
    pub fn exact_len(&self) -> usize {
        self.exact.len()
    }

    /// The full extent of the data as `[first.time, last.time]`.
    pub fn span(&self) -> Option<TimeRange> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some(TimeRange::new(first.time, last.time)),
            _ => None,
        }
    }

    /// Samples whose time falls within `[start - pad, end + pad]`, with a
    /// fixed 5-minute pad on both ends so edge points are not clipped by
    /// rounding. `None` returns all samples.
    pub fn filter_to_range(&self, range: Option<TimeRange>) -> Vec<Sample> {
        match range {
            None => self.samples.clone(),
            Some(range) => {
                let lo = range.start - RANGE_PAD_MS;
                let hi = range.end + RANGE_PAD_MS;
                self.samples
                    .iter()
                    .copied()
                    .filter(|s| s.time >= lo && s.time <= hi)
                    .collect()
            }
        }
    }

    /// Exact per-second lookup: O(1) hit on the epoch-second index.
    pub fn exact_at(&self, instant: Instant) -> Option<Sample> {
        self.exact.get(&instant.div_euclid(1000)).copied()
    }

    /// Nearest sample within `tolerance_ms` of `instant`, by lower-bound
    /// binary search over the time-ordered samples. Equal distances resolve
    /// to the earlier sample.
    pub fn nearest_at(&self, instant: Instant, tolerance_ms: i64) -> Option<Sample> {
        let lo = self.samples.partition_point(|s| s.time < instant);
        let prev = lo.checked_sub(1).and_then(|i| self.samples.get(i));
        let next = self.samples.get(lo);
        let best = match (prev, next) {
            (Some(p), Some(n)) => {
                if instant - p.time <= n.time - instant {
                    p
                } else {
                    n
                }
            }
            (Some(p), None) => p,
            (None, Some(n)) => n,
            (None, None) => return None,
        };
        ((best.time - instant).abs() <= tolerance_ms).then_some(*best)
    }

    /// Tolerance for nearest lookups: `max(60s, step / 2)` where `step` is
    /// the delta between the first two samples (0 with fewer than two).
    pub fn tolerance_ms(&self) -> i64 {
        let step = match self.samples.as_slice() {
            [first, second, ..] => (second.time - first.time).abs(),
            _ => 0,
        };
        MIN_CURSOR_TOLERANCE_MS.max(step / 2)
    }
}
