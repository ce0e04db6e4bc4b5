use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::metar::selector::Trend;

/// Raw text used for stations with no usable report
pub const NO_REPORT_TEXT: &str = "no report available";

/// What could be extracted from a single report line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedObservation {
    pub station_id: Option<String>,
    /// `DDHHMMZ` day/time code, compared as text
    pub timestamp: Option<String>,
    /// Matched temperature/dew-point group, e.g. `M05/M09`
    pub temperature_group: Option<String>,
    pub temperature_c: Option<i32>,
    pub dew_point_c: Option<i32>,
    pub raw_text: String,
}

impl ParsedObservation {
    /// A line counts only when it names a station and carries a temperature group
    pub fn is_usable(&self) -> bool {
        self.station_id.is_some() && self.temperature_group.is_some()
    }
}

/// One row of output, always present for every registered station
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationResult {
    pub id: String,
    pub display_name: String,
    pub temperature_c: Option<i32>,
    pub temperature_f: Option<i32>,
    pub trend: Trend,
    pub raw_text: String,
}

impl StationResult {
    pub fn has_data(&self) -> bool {
        self.temperature_c.is_some()
    }
}

/// Envelope returned to callers, stamped with the time it was built
#[derive(Debug, Clone, Serialize)]
pub struct TempsResponse {
    pub airports: Vec<StationResult>,
    pub updated: DateTime<Utc>,
}

impl TempsResponse {
    pub fn new(airports: Vec<StationResult>) -> Self {
        Self {
            airports,
            updated: Utc::now(),
        }
    }
}
