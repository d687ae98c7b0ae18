//! Visible-domain resolution and axis tick generation.
//!
//! Given a requested zoom window and the actual extent of a series, decides
//! what the chart x-axis should show. The requested window wins whenever it
//! contains data; a window panned entirely off the data snaps back to the
//! full data span, so the domain never collapses to an empty range.

use crate::series::{Instant, TimeRange, TimeSeries};
use crate::state::TICK_STEP_MS;

/// The effective x-axis domain for a panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectiveDomain {
    /// No explicit window: the renderer shows the series' own min/max.
    FullExtent,
    /// A concrete `[start, end]` window.
    Window(TimeRange),
}

/// Resolve the display domain for `series` under `requested`.
///
/// `None` requested (or an empty series) yields the symbolic full-extent
/// marker. A requested window containing at least one sample is returned
/// unchanged; otherwise the series' own span is used instead.
pub fn effective_domain(series: &TimeSeries, requested: Option<TimeRange>) -> EffectiveDomain {
    let Some(requested) = requested else {
        return EffectiveDomain::FullExtent;
    };
    let Some(span) = series.span() else {
        return EffectiveDomain::FullExtent;
    };
    let has_any = series.samples().iter().any(|s| requested.contains(s.time));
    if has_any {
        EffectiveDomain::Window(requested)
    } else {
        EffectiveDomain::Window(span)
    }
}

/// Axis ticks for a requested window: every multiple of `step_ms` from the
/// floor-aligned start through `end` inclusive.
///
/// Alignment to absolute multiples of the step guarantees that every panel
/// (and the scrub control) sharing the same requested range shows ticks at
/// identical instants. `None` requested produces no explicit ticks.
pub fn aligned_ticks(requested: Option<TimeRange>, step_ms: i64) -> Option<Vec<Instant>> {
    let range = requested?;
    if step_ms <= 0 {
        return Some(Vec::new());
    }
    let aligned_start = range.start.div_euclid(step_ms) * step_ms;
    let mut ticks = Vec::new();
    let mut tick = aligned_start;
    while tick <= range.end {
        ticks.push(tick);
        tick += step_ms;
    }
    Some(ticks)
}

/// Ticks at the default 10-minute spacing.
pub fn default_ticks(requested: Option<TimeRange>) -> Option<Vec<Instant>> {
    aligned_ticks(requested, TICK_STEP_MS)
}
