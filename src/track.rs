//! Time-sorted GPS track with nearest-fix lookup.
//!
//! Drives map-marker placement: on every cursor change the track resolves
//! the recorded fix nearest the selected instant. Unlike channel cursor
//! resolution there is no tolerance cutoff — position persists between
//! infrequent fixes, so the nearest one is always returned.

use crate::ingest::{self, GpsPayload, GpsRow};
use crate::series::Instant;

/// One position fix. Both coordinates are finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GpsPoint {
    pub time: Instant,
    pub lat: f64,
    pub lng: f64,
}

/// A sequence of position fixes sorted ascending by time. The sorted array
/// is owned exclusively by the track; it is built once per data load and
/// never mutated afterward.
#[derive(Clone, Debug, Default)]
pub struct GpsTrack {
    points: Vec<GpsPoint>,
}

impl GpsTrack {
    /// Build a track from raw rows, deriving the `HH:mm:ss` day baseline
    /// from the first row carrying an absolute timestamp.
    pub fn build(rows: &[GpsRow]) -> Self {
        let baseline = rows
            .iter()
            .find_map(GpsRow::absolute_time)
            .map(ingest::day_start_ms)
            .unwrap_or(0);
        Self::build_with_baseline(rows, baseline)
    }

    /// Build a track from a full charts-data payload, anchoring `HH:mm:ss`
    /// rows to the payload's absolute timeline.
    pub fn from_payload(payload: &GpsPayload) -> Self {
        match payload.day_baseline() {
            Some(baseline) => Self::build_with_baseline(&payload.gps_per_second, baseline),
            None => Self::build(&payload.gps_per_second),
        }
    }

    /// Build a track with an explicit day-start baseline. Rows with a
    /// non-finite coordinate or an unresolvable timestamp are dropped; the
    /// result is sorted ascending by time.
    pub fn build_with_baseline(rows: &[GpsRow], baseline: Instant) -> Self {
        let mut points: Vec<GpsPoint> = rows
            .iter()
            .filter_map(|row| {
                let (lat, lng) = row.coords()?;
                let time = row.resolved_time(baseline)?;
                Some(GpsPoint { time, lat, lng })
            })
            .collect();

        let dropped = rows.len() - points.len();
        if dropped > 0 {
            tracing::debug!(dropped, kept = points.len(), "dropped unusable GPS rows");
        }

        points.sort_by_key(|p| p.time);
        Self { points }
    }

    /// Build a track from already-normalized points (e.g. a replayed or
    /// synthetic track). Points with a non-finite coordinate are dropped;
    /// the result is sorted ascending by time.
    pub fn from_points(points: Vec<GpsPoint>) -> Self {
        let mut points: Vec<GpsPoint> = points
            .into_iter()
            .filter(|p| p.lat.is_finite() && p.lng.is_finite())
            .collect();
        points.sort_by_key(|p| p.time);
        Self { points }
    }

    pub fn points(&self) -> &[GpsPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The fix nearest `instant`, however far in time. `None` only for an
    /// empty track.
    ///
    /// Lower-bound binary search finds the first fix at or after `instant`;
    /// the candidates on either side are compared and equal distances
    /// resolve to the earlier fix.
    pub fn nearest_at(&self, instant: Instant) -> Option<GpsPoint> {
        let lo = self.points.partition_point(|p| p.time < instant);
        let prev = lo.checked_sub(1).and_then(|i| self.points.get(i));
        let next = self.points.get(lo);
        match (prev, next) {
            (Some(p), Some(n)) => {
                if instant - p.time <= n.time - instant {
                    Some(*p)
                } else {
                    Some(*n)
                }
            }
            (Some(p), None) => Some(*p),
            (None, Some(n)) => Some(*n),
            (None, None) => None,
        }
    }
}
