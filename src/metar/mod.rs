//! METAR temperature pipeline: tokenizer -> temperature extraction -> selection -> assembly.
//!
//! Everything here is pure and request-scoped. Irregular input never fails; every
//! registered station always comes back, with a placeholder when nothing usable was found.

pub mod assembler;
pub mod selector;
pub mod temperature;
pub mod tokenizer;

use std::collections::HashMap;
use tracing::{debug, warn};

use crate::fetch::FetchError;
use crate::models::report::StationResult;
use crate::stations::StationRegistry;

/// Run the full pipeline over one raw blob holding reports for any number of stations
pub fn parse_and_assemble(raw: &str, registry: &StationRegistry) -> Vec<StationResult> {
    let selections = selector::select_latest(tokenizer::parse_report(raw));
    debug!("Selected reports for {} stations", selections.len());
    assembler::assemble(registry, &selections)
}

/// Run the pipeline over per-station fetch results.
///
/// A failed fetch, or a missing entry, only turns that station into a placeholder.
/// Lines naming a different station than the one they were fetched for are ignored.
pub fn parse_and_assemble_per_station(
    per_station: &HashMap<String, Result<String, FetchError>>,
    registry: &StationRegistry,
) -> Vec<StationResult> {
    let mut observations = Vec::new();

    for id in registry.ids() {
        match per_station.get(id) {
            Some(Ok(raw)) => {
                observations.extend(tokenizer::parse_report(raw).filter(|obs| {
                    let matches = obs.station_id.as_deref() == Some(id);
                    if !matches && obs.station_id.is_some() {
                        debug!("Ignoring report for another station in {} response: {}", id, obs.raw_text);
                    }
                    matches
                }));
            }
            Some(Err(e)) => warn!("No data for {}: {}", id, e),
            None => debug!("No fetch result for {}", id),
        }
    }

    let selections = selector::select_latest(observations);
    assembler::assemble(registry, &selections)
}

#[cfg(test)]
mod tests {
    use super::selector::Trend;
    use super::*;
    use crate::models::report::NO_REPORT_TEXT;
    use crate::stations::StationSpec;

    const SAMPLE: &str = "\
METAR KLAX 011853Z 25012KT 10SM FEW020 22/14 A2992 RMK AO2 SLP132 T02220139
KORD 011851Z 05010KT 10SM OVC030 05/01 A3001

KMIA 011853Z 09012KT 10SM SCT025 28/22 A3005
SPECI KDEN 011910Z 36010KT 5SM -SN M05/M09 A3020
KDEN 011853Z 36010KT 10SM M03/M09 A3021
KAUS SPECIAL REPORT NO DATA
";

    #[test]
    fn test_totality_on_empty_input() {
        let registry = StationRegistry::default();
        let results = parse_and_assemble("", &registry);
        assert_eq!(results.len(), registry.len());
        for (result, station) in results.iter().zip(registry.stations()) {
            assert_eq!(result.id, station.id);
            assert_eq!(result.display_name, station.display_name);
            assert_eq!(result.temperature_c, None);
            assert_eq!(result.raw_text, NO_REPORT_TEXT);
        }
    }

    #[test]
    fn test_sample_blob() {
        let registry = StationRegistry::default();
        let results = parse_and_assemble(SAMPLE, &registry);
        assert_eq!(results.len(), 10);

        let by_id: HashMap<_, _> = results.iter().map(|r| (r.id.as_str(), r)).collect();
        assert_eq!(by_id["KLAX"].temperature_c, Some(22));
        assert_eq!(by_id["KLAX"].temperature_f, Some(72));
        assert_eq!(by_id["KORD"].temperature_c, Some(5));
        assert_eq!(by_id["KMIA"].temperature_c, Some(28));

        // Later SPECI wins over the routine report, and it is colder
        assert_eq!(by_id["KDEN"].temperature_c, Some(-5));
        assert_eq!(by_id["KDEN"].trend, Trend::Falling);
        assert!(by_id["KDEN"].raw_text.starts_with("SPECI KDEN 011910Z"));

        // Station named but no temperature group
        assert_eq!(by_id["KAUS"].temperature_c, None);
        assert_eq!(by_id["KAUS"].raw_text, NO_REPORT_TEXT);

        assert_eq!(by_id["KJFK"].raw_text, NO_REPORT_TEXT);
    }

    #[test]
    fn test_fahrenheit_derivation_holds() {
        let results = parse_and_assemble(SAMPLE, &StationRegistry::default());
        for r in &results {
            match r.temperature_c {
                Some(c) => assert_eq!(r.temperature_f, Some((c as f64 * 9.0 / 5.0 + 32.0).round() as i32)),
                None => assert_eq!(r.temperature_f, None),
            }
        }
    }

    #[test]
    fn test_station_without_lines() {
        let results = parse_and_assemble("KLAX 011853Z 22/14 A2992", &StationRegistry::default());
        let den = results.iter().find(|r| r.id == "KDEN").unwrap();
        assert_eq!(den.temperature_c, None);
        assert_eq!(den.temperature_f, None);
        assert_eq!(den.trend, Trend::FlatOrUnknown);
        assert_eq!(den.raw_text, NO_REPORT_TEXT);
    }

    #[test]
    fn test_deterministic() {
        let registry = StationRegistry::default();
        assert_eq!(parse_and_assemble(SAMPLE, &registry), parse_and_assemble(SAMPLE, &registry));
    }

    #[test]
    fn test_shuffled_duplicates_same_latest() {
        let registry = StationRegistry::new(vec![StationSpec::new("KIAH", "Houston")]).unwrap();
        let a = parse_and_assemble(
            "KIAH 011753Z 10/05 A2990\nKIAH 011853Z 15/05 A2990\nKIAH 011653Z 08/05 A2990",
            &registry,
        );
        let b = parse_and_assemble(
            "KIAH 011853Z 15/05 A2990\nKIAH 011653Z 08/05 A2990\nKIAH 011753Z 10/05 A2990",
            &registry,
        );
        assert_eq!(a, b);
        assert_eq!(a[0].temperature_c, Some(15));
        assert_eq!(a[0].trend, Trend::Rising);
    }

    #[test]
    fn test_equal_temperatures_flat() {
        let registry = StationRegistry::new(vec![StationSpec::new("KIAH", "Houston")]).unwrap();
        let results = parse_and_assemble("KIAH 011753Z 10/05 A2990\nKIAH 011853Z 10/04 A2990", &registry);
        assert_eq!(results[0].trend, Trend::FlatOrUnknown);
    }

    #[test]
    fn test_per_station_mode() {
        let registry = StationRegistry::new(vec![
            StationSpec::new("KLAX", "Los Angeles"),
            StationSpec::new("KSFO", "San Francisco"),
            StationSpec::new("KSEA", "Seattle"),
            StationSpec::new("KDFW", "Dallas"),
        ])
        .unwrap();

        let mut per_station = HashMap::new();
        per_station.insert("KLAX".to_string(), Ok("KLAX 011853Z 22/14 A2992\nKLAX 011753Z 20/14 A2992".to_string()));
        per_station.insert("KSFO".to_string(), Err(FetchError::Status { station: "KSFO".to_string(), status: 503 }));
        per_station.insert("KSEA".to_string(), Ok("KORD 011851Z 05/01 A3001".to_string()));

        let results = parse_and_assemble_per_station(&per_station, &registry);
        let ids: Vec<_> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["KLAX", "KSFO", "KSEA", "KDFW"]);

        assert_eq!(results[0].temperature_c, Some(22));
        assert_eq!(results[0].trend, Trend::Rising);
        assert_eq!(results[1].raw_text, NO_REPORT_TEXT);
        assert_eq!(results[2].raw_text, NO_REPORT_TEXT);
        assert_eq!(results[3].raw_text, NO_REPORT_TEXT);
    }
}
