//! Raw API row ingestion.
//!
//! Telemetry and GPS rows arrive as JSON produced by several backend
//! generations that disagree on key spelling, numeric representation
//! (numbers vs. `"102"`-style strings) and timestamp encoding (millisecond
//! epoch, second epoch, date-time strings, or bare `HH:mm:ss` keys). This
//! module absorbs all of that at the edge so the core series/track types
//! only ever hold finite numbers and millisecond instants.
//!
//! Malformed rows are dropped or coerced, never propagated as errors; only
//! a payload that fails to parse as JSON at all surfaces an [`IngestError`].

pub mod gps;
pub mod telemetry;

pub use gps::{GpsPayload, GpsRow};
pub use telemetry::{telemetry_rows_from_json, TelemetryRow};

use chrono::Timelike;
use serde::Deserialize;
use thiserror::Error;

use crate::series::Instant;

/// Errors from parsing a raw API response body.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The body is not valid JSON, or its shape does not match the rows.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    /// The body parsed, but rows were expected and something else was found.
    #[error("payload is not a JSON array of rows")]
    NotAnArray,
}

// ============================================================================
// Flexible field types
// ============================================================================

/// A numeric field that backends serialize either as a JSON number or as a
/// string (`102` vs `"102"`).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FlexNum {
    Num(f64),
    Text(String),
}

impl FlexNum {
    /// The value as a finite `f64`. Non-numeric strings and non-finite
    /// numbers yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            FlexNum::Num(n) => *n,
            FlexNum::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A timestamp field: an epoch number (seconds or milliseconds), a numeric
/// string, a parseable date-time string, or a bare `HH:mm:ss` key.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawTimestamp {
    Num(f64),
    Text(String),
}

impl RawTimestamp {
    /// Resolve to a millisecond instant if the value is absolute (epoch or
    /// date-time text). `HH:mm:ss` keys are not absolute and yield `None`.
    pub fn absolute_ms(&self) -> Option<Instant> {
        match self {
            RawTimestamp::Num(n) => normalize_epoch_ms(*n),
            RawTimestamp::Text(s) => parse_absolute_text(s),
        }
    }

    /// Resolve to a millisecond instant, falling back to `HH:mm:ss`
    /// interpretation against `baseline` (a day-start instant).
    pub fn resolve_ms(&self, baseline: Instant) -> Option<Instant> {
        if let Some(ms) = self.absolute_ms() {
            return Some(ms);
        }
        match self {
            RawTimestamp::Text(s) => parse_hms_ms(s, baseline),
            RawTimestamp::Num(_) => None,
        }
    }
}

// ============================================================================
// Timestamp normalization
// ============================================================================

/// Normalize an epoch value to milliseconds. Values below `1e12` are
/// treated as second-resolution epochs and scaled; this heuristic is
/// best-effort for pathological inputs (spans before 2001 encoded in
/// milliseconds would be misread as seconds).
pub fn normalize_epoch_ms(value: f64) -> Option<Instant> {
    if !value.is_finite() {
        return None;
    }
    let ms = if value < 1e12 { value * 1000.0 } else { value };
    Some(ms as Instant)
}

/// Parse an absolute date-time string: a numeric epoch, RFC 3339, or a
/// naive `YYYY-MM-DD HH:MM:SS` interpreted in local time.
fn parse_absolute_text(text: &str) -> Option<Instant> {
    let text = text.trim();
    if let Ok(n) = text.parse::<f64>() {
        return normalize_epoch_ms(n);
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
        return naive
            .and_local_timezone(chrono::Local)
            .earliest()
            .map(|dt| dt.timestamp_millis());
    }
    None
}

/// Resolve an `HH:mm:ss` wall-clock key against a day-start baseline.
pub fn parse_hms_ms(hms: &str, baseline: Instant) -> Option<Instant> {
    let time = chrono::NaiveTime::parse_from_str(hms.trim(), "%H:%M:%S").ok()?;
    Some(baseline + i64::from(time.num_seconds_from_midnight()) * 1000)
}

/// Local midnight of the day containing `instant`.
///
/// `HH:mm:ss`-only rows are resolved against this baseline; a recording
/// that crosses midnight aliases into the baseline day. That ambiguity is
/// inherent to `HH:mm:ss` sources and left unresolved.
pub fn day_start_ms(instant: Instant) -> Instant {
    use chrono::{Local, NaiveTime, TimeZone};

    let utc_midnight = instant - instant.rem_euclid(86_400_000);
    let Some(dt) = Local.timestamp_millis_opt(instant).single() else {
        return utc_midnight;
    };
    dt.date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .map(|midnight| midnight.timestamp_millis())
        .unwrap_or(utc_midnight)
}

/// Unwrap the optional `{ "data": ... }` envelope some backends add around
/// the payload body.
pub(crate) fn unwrap_data(mut value: serde_json::Value) -> serde_json::Value {
    if let serde_json::Value::Object(ref mut map) = value {
        if let Some(inner) = map.remove("data") {
            return inner;
        }
    }
    value
}
