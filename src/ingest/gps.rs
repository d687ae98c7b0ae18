//! GPS fix row and payload ingestion.

use serde::Deserialize;

use super::{unwrap_data, FlexNum, IngestError, RawTimestamp};
use crate::series::Instant;

/// One raw GPS fix as returned by the charts-data API.
///
/// Coordinate and timestamp keys vary by backend; serde aliases absorb the
/// spellings seen in the wild.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GpsRow {
    /// Epoch timestamp (seconds or milliseconds, number or numeric string).
    #[serde(default, alias = "timeStamp", alias = "ts")]
    pub timestamp: Option<FlexNum>,
    /// `HH:mm:ss` wall-clock key, used when no epoch timestamp is present.
    #[serde(default, alias = "Time", alias = "TIME")]
    pub time: Option<String>,
    #[serde(
        default,
        alias = "latitude",
        alias = "Latitude",
        alias = "Lat",
        alias = "LAT"
    )]
    pub lat: Option<FlexNum>,
    #[serde(
        default,
        alias = "lon",
        alias = "longitude",
        alias = "Longitude",
        alias = "Lon",
        alias = "LON"
    )]
    pub lng: Option<FlexNum>,
}

impl GpsRow {
    /// Both coordinates as finite values, or `None` if either is unusable.
    pub fn coords(&self) -> Option<(f64, f64)> {
        let lat = self.lat.as_ref()?.as_f64()?;
        let lng = self.lng.as_ref()?.as_f64()?;
        Some((lat, lng))
    }

    /// Absolute epoch timestamp, scale-normalized to milliseconds.
    pub fn absolute_time(&self) -> Option<Instant> {
        let epoch = self.timestamp.as_ref()?.as_f64()?;
        super::normalize_epoch_ms(epoch)
    }

    /// Timestamp resolved against a day-start `baseline` when the row only
    /// carries an `HH:mm:ss` key. A row with no time field at all resolves
    /// to the baseline itself.
    pub fn resolved_time(&self, baseline: Instant) -> Option<Instant> {
        if let Some(ms) = self.absolute_time() {
            return Some(ms);
        }
        let hms = self.time.as_deref().unwrap_or("00:00:00");
        super::parse_hms_ms(hms, baseline)
    }
}

/// The charts-data API payload: per-second GPS fixes plus an absolute
/// timeline whose first entry anchors the `HH:mm:ss` day baseline.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsPayload {
    #[serde(default)]
    pub gps_per_second: Vec<GpsRow>,
    #[serde(default, alias = "timestamps")]
    pub times: Vec<RawTimestamp>,
}

impl GpsPayload {
    /// Parse an API response body. Accepts a bare payload object or a
    /// `{ "data": {...} }` envelope.
    pub fn from_json(body: &str) -> Result<Self, IngestError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Ok(serde_json::from_value(unwrap_data(value))?)
    }

    /// Local-midnight baseline derived from the first absolute timeline
    /// entry, if the payload carries one.
    pub fn day_baseline(&self) -> Option<Instant> {
        self.times
            .iter()
            .find_map(RawTimestamp::absolute_ms)
            .map(super::day_start_ms)
    }
}
