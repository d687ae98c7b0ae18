//! fleetscope - time-series alignment and lookup engine for vehicle
//! telemetry dashboards.
//!
//! The crate indexes per-second telemetry records and GPS fixes loaded in
//! one batch per vehicle/date selection, and answers the point and window
//! queries a dashboard issues while the user scrubs a shared time cursor
//! across chart panels and a map. All queries are pure, synchronous
//! functions of their inputs; the surrounding application owns the cursor
//! and the loads.
//!
//! ## Module Structure
//!
//! - [`ingest`] - Raw API row deserialization and timestamp normalization
//! - [`series`] - Per-channel sample series with exact/nearest lookup
//! - [`cursor`] - Exact-first, nearest-fallback cursor resolution
//! - [`stats`] - Windowed avg/min/max aggregates
//! - [`domain`] - Visible-domain resolution and axis tick generation
//! - [`track`] - Time-sorted GPS track with nearest-fix search
//! - [`state`] - Shared constants, palette, and load-generation tracking

pub mod cursor;
pub mod domain;
pub mod ingest;
pub mod series;
pub mod state;
pub mod stats;
pub mod track;
