use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

use crate::models::report::ParsedObservation;

/// Direction of change between the two most recent readings for a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Trend {
    Rising,
    Falling,
    FlatOrUnknown,
}

impl Trend {
    pub fn between(latest: Option<i32>, previous: Option<i32>) -> Self {
        match (latest, previous) {
            (Some(l), Some(p)) if l > p => Trend::Rising,
            (Some(l), Some(p)) if l < p => Trend::Falling,
            _ => Trend::FlatOrUnknown,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Rising => "↑",
            Trend::Falling => "↓",
            Trend::FlatOrUnknown => "→",
        }
    }
}

/// Latest observation chosen for a station, plus the one before it if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationSelection {
    pub latest: ParsedObservation,
    pub previous: Option<ParsedObservation>,
    pub trend: Trend,
    pub observation_count: usize,
}

/// Group usable observations by station and pick the most recent for each.
///
/// Within a station, observations are ordered newest first by their `DDHHMMZ`
/// code. Ones without a time code sink below every timed observation and keep
/// their input order among themselves. Stations that never appear are simply
/// absent from the returned map.
pub fn select_latest<I>(observations: I) -> HashMap<String, StationSelection>
where
    I: IntoIterator<Item = ParsedObservation>,
{
    let mut groups: HashMap<String, Vec<ParsedObservation>> = HashMap::new();

    for obs in observations {
        if !obs.is_usable() {
            debug!("Dropping unusable report line: {}", obs.raw_text);
            continue;
        }
        let Some(id) = obs.station_id.clone() else {
            continue;
        };
        groups.entry(id).or_default().push(obs);
    }

    groups
        .into_iter()
        .filter_map(|(id, group)| select_group(group).map(|s| (id, s)))
        .collect()
}

fn select_group(mut group: Vec<ParsedObservation>) -> Option<StationSelection> {
    let observation_count = group.len();

    // Stable sort: `None` orders below any `Some`, so reversing puts timed reports first
    group.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut ordered = group.into_iter();
    let latest = ordered.next()?;
    let previous = ordered.next();
    let trend = Trend::between(
        latest.temperature_c,
        previous.as_ref().and_then(|p| p.temperature_c),
    );

    Some(StationSelection {
        latest,
        previous,
        trend,
        observation_count,
    })
}
