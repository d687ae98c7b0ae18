//! Shared constants and load-lifecycle types.
//!
//! This module contains the fixed tuning constants used by the query engine,
//! the default chart color palette, and the generation-tagged slot that the
//! surrounding loader uses to publish rebuilt series without racing a
//! superseded in-flight load.

// ============================================================================
// Constants
// ============================================================================

/// Padding added on both ends of a visible-range filter so edge points are
/// not clipped by rounding (5 minutes).
pub const RANGE_PAD_MS: i64 = 5 * 60 * 1000;

/// Minimum tolerance for a nearest-sample cursor lookup (1 minute).
/// The effective tolerance is `max(MIN_CURSOR_TOLERANCE_MS, step / 2)`.
pub const MIN_CURSOR_TOLERANCE_MS: i64 = 60 * 1000;

/// Default tick spacing for chart axes (10 minutes). All panels sharing a
/// requested range must derive ticks from the same step so their axes align.
pub const TICK_STEP_MS: i64 = 10 * 60 * 1000;

/// Color palette for channel lines, assigned round-robin by channel index.
pub const CHART_COLORS: &[[u8; 3]] = &[
    [113, 120, 78],  // Olive green (primary)
    [191, 78, 48],   // Rust orange (accent)
    [71, 108, 155],  // Blue (info)
    [159, 166, 119], // Sage green (success)
    [253, 193, 73],  // Amber (warning)
    [135, 30, 28],   // Dark red (error)
    [100, 149, 237], // Cornflower blue
    [255, 127, 80],  // Coral
];

/// Get the palette color for a channel index (wraps around).
pub fn channel_color(index: usize) -> [u8; 3] {
    CHART_COLORS[index % CHART_COLORS.len()]
}

// ============================================================================
// Load lifecycle
// ============================================================================

/// A slot holding the current build of a series or track, replaced wholesale
/// on every data load.
///
/// Each load calls [`LoadSlot::begin`] before fetching and passes the
/// returned generation to [`LoadSlot::publish`] when its build completes.
/// A publish from a load that was superseded by a newer `begin` is rejected,
/// so an out-of-order response can never overwrite newer data. Queries see
/// either the previous complete value or the next one, never a partial build.
#[derive(Debug, Default)]
pub struct LoadSlot<T> {
    value: Option<T>,
    latest: u64,
    published: u64,
}

impl<T> LoadSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            value: None,
            latest: 0,
            published: 0,
        }
    }

    /// Start a new load, superseding any load still in flight.
    /// Returns the generation tag the load must publish with.
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    /// Publish a completed build. Returns `false` (and drops `value`) if a
    /// newer load has begun since this generation was issued.
    pub fn publish(&mut self, generation: u64, value: T) -> bool {
        if generation != self.latest {
            tracing::debug!(
                generation,
                latest = self.latest,
                "discarding stale load result"
            );
            return false;
        }
        self.value = Some(value);
        self.published = generation;
        true
    }

    /// The currently published value, if any load has completed.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether a load newer than the published value is in flight.
    pub fn is_loading(&self) -> bool {
        self.latest > self.published
    }

    /// Drop the published value (e.g. on deselection).
    pub fn clear(&mut self) {
        self.value = None;
    }
}
