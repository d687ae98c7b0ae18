//! Telemetry row ingestion for one analog channel.

use serde::Deserialize;

use super::{unwrap_data, FlexNum, IngestError, RawTimestamp};
use crate::series::Instant;

/// One raw telemetry reading as returned by the charts API.
///
/// Backends disagree on which fields are present: some send a single
/// `value`, some per-minute `avg`/`min`/`max` aggregates, some additionally
/// the per-second `rawAvg`/`rawMin`/`rawMax` variants plus a precomputed
/// `hms` key. All fields are optional; the series build decides what a row
/// contributes and drops rows without a usable value.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRow {
    /// Timestamp: millisecond/second epoch, a date-time string, or an
    /// `HH:mm:ss` key.
    #[serde(
        default,
        alias = "timestamp",
        alias = "ts",
        alias = "Time",
        alias = "TIME"
    )]
    pub time: Option<RawTimestamp>,
    /// Single-value fallback when the backend sends no aggregates.
    #[serde(default)]
    pub value: Option<FlexNum>,
    #[serde(default)]
    pub avg: Option<FlexNum>,
    #[serde(default)]
    pub min: Option<FlexNum>,
    #[serde(default)]
    pub max: Option<FlexNum>,
    /// Per-second variant, preferred for the exact-second index.
    #[serde(default)]
    pub raw_avg: Option<FlexNum>,
    #[serde(default)]
    pub raw_min: Option<FlexNum>,
    #[serde(default)]
    pub raw_max: Option<FlexNum>,
    /// Optional precomputed `HH:mm:ss` key, used as a timestamp fallback.
    #[serde(default)]
    pub hms: Option<String>,
}

impl TelemetryRow {
    /// Display-series average: `avg`, falling back to `value`.
    pub fn display_avg(&self) -> Option<f64> {
        finite(&self.avg).or_else(|| finite(&self.value))
    }

    /// Display-series minimum: `min`, else `value`.
    pub fn display_min(&self) -> Option<f64> {
        finite(&self.min).or_else(|| finite(&self.value))
    }

    /// Display-series maximum: `max`, else `value`.
    pub fn display_max(&self) -> Option<f64> {
        finite(&self.max).or_else(|| finite(&self.value))
    }

    /// Exact-index average, preferring the per-second `rawAvg` variant.
    pub fn exact_avg(&self) -> Option<f64> {
        finite(&self.raw_avg).or_else(|| self.display_avg())
    }

    /// Exact-index minimum, preferring `rawMin`.
    pub fn exact_min(&self) -> Option<f64> {
        finite(&self.raw_min).or_else(|| self.display_min())
    }

    /// Exact-index maximum, preferring `rawMax`.
    pub fn exact_max(&self) -> Option<f64> {
        finite(&self.raw_max).or_else(|| self.display_max())
    }

    /// Absolute timestamp if the row carries one (epoch or date-time text).
    pub fn absolute_time(&self) -> Option<Instant> {
        self.time.as_ref().and_then(RawTimestamp::absolute_ms)
    }

    /// Timestamp resolved against a day-start `baseline` for rows that only
    /// carry an `HH:mm:ss` key (in `hms` or in the time field itself).
    pub fn resolved_time(&self, baseline: Instant) -> Option<Instant> {
        if let Some(ms) = self.absolute_time() {
            return Some(ms);
        }
        if let Some(hms) = &self.hms {
            if let Some(ms) = super::parse_hms_ms(hms, baseline) {
                return Some(ms);
            }
        }
        self.time.as_ref().and_then(|t| t.resolve_ms(baseline))
    }
}

/// Parse an API response body into telemetry rows. Accepts a bare JSON
/// array or a `{ "data": [...] }` envelope.
pub fn telemetry_rows_from_json(body: &str) -> Result<Vec<TelemetryRow>, IngestError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let value = unwrap_data(value);
    if !value.is_array() {
        return Err(IngestError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}

fn finite(field: &Option<FlexNum>) -> Option<f64> {
    field.as_ref().and_then(FlexNum::as_f64)
}
