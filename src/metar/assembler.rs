use std::collections::HashMap;
use tracing::debug;

use super::selector::{StationSelection, Trend};
use super::temperature::celsius_to_fahrenheit;
use crate::models::report::{StationResult, NO_REPORT_TEXT};
use crate::stations::{StationRegistry, StationSpec};

/// Build one result per registered station, in registry order
pub fn assemble(
    registry: &StationRegistry,
    selections: &HashMap<String, StationSelection>,
) -> Vec<StationResult> {
    registry
        .stations()
        .iter()
        .map(|station| match selections.get(&station.id) {
            Some(selection) => from_selection(station, selection),
            None => {
                debug!("No usable report for {}", station.id);
                placeholder(station)
            }
        })
        .collect()
}

fn from_selection(station: &StationSpec, selection: &StationSelection) -> StationResult {
    let temperature_c = selection.latest.temperature_c;
    debug!(
        "{}: latest of {} reports is {}",
        station.id,
        selection.observation_count,
        selection.latest.timestamp.as_deref().unwrap_or("untimed")
    );
    StationResult {
        id: station.id.clone(),
        display_name: station.display_name.clone(),
        temperature_c,
        temperature_f: temperature_c.map(celsius_to_fahrenheit),
        trend: selection.trend,
        raw_text: selection.latest.raw_text.clone(),
    }
}

fn placeholder(station: &StationSpec) -> StationResult {
    StationResult {
        id: station.id.clone(),
        display_name: station.display_name.clone(),
        temperature_c: None,
        temperature_f: None,
        trend: Trend::FlatOrUnknown,
        raw_text: NO_REPORT_TEXT.to_string(),
    }
}
