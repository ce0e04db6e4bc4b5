use regex::Regex;
use std::sync::OnceLock;

use super::temperature::TemperatureGroup;
use crate::models::report::ParsedObservation;

fn station_re() -> &'static Regex {
    static STATION_RE: OnceLock<Regex> = OnceLock::new();
    STATION_RE.get_or_init(|| {
        Regex::new(r"^(?:(?:METAR|SPECI)(?:\s+COR)?\s+)?([A-Z]{4})\s").unwrap()
    })
}

fn timestamp_re() -> &'static Regex {
    static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_RE.get_or_init(|| Regex::new(r"\b(\d{6})Z\b").unwrap())
}

fn temperature_re() -> &'static Regex {
    static TEMPERATURE_RE: OnceLock<Regex> = OnceLock::new();
    TEMPERATURE_RE.get_or_init(|| Regex::new(r"\s(M?\d{2})/(M?\d{2})(?:\s|$)").unwrap())
}

/// Non-blank, trimmed lines of a raw report blob
pub fn report_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Station id at the start of the line, or right after a METAR/SPECI keyword
pub fn extract_station_id(line: &str) -> Option<&str> {
    station_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Observation time code including the trailing `Z`, e.g. `011853Z`
pub fn extract_timestamp(line: &str) -> Option<String> {
    timestamp_re()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}Z", m.as_str()))
}

/// First temperature/dew-point group on the line, returned as (group text, air token, dew point token).
///
/// Only the first match counts. Later groups that happen to look like `NN/NN`
/// are ignored, so a malformed report with such a group ahead of the real one
/// will be misread.
pub fn extract_temperature_group(line: &str) -> Option<(&str, &str, &str)> {
    let caps = temperature_re().captures(line)?;
    let air = caps.get(1)?;
    let dew_point = caps.get(2)?;
    Some((&line[air.start()..dew_point.end()], air.as_str(), dew_point.as_str()))
}

/// Pull everything the pipeline needs out of one trimmed line
pub fn parse_line(line: &str) -> ParsedObservation {
    let line = line.trim();
    let station_id = extract_station_id(line).map(str::to_string);
    let timestamp = extract_timestamp(line);

    let (temperature_group, group) = match extract_temperature_group(line) {
        Some((text, air, dew_point)) => (
            Some(text.to_string()),
            Some(TemperatureGroup::from_tokens(air, dew_point)),
        ),
        None => (None, None),
    };

    ParsedObservation {
        station_id,
        timestamp,
        temperature_group,
        temperature_c: group.and_then(|g| g.air_c),
        dew_point_c: group.and_then(|g| g.dew_point_c),
        raw_text: line.to_string(),
    }
}

/// Parse every line of a blob, in input order
pub fn parse_report(raw: &str) -> impl Iterator<Item = ParsedObservation> + '_ {
    report_lines(raw).map(parse_line)
}
