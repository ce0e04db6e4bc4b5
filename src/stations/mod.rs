use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A reporting site: 4-letter ICAO code plus the name shown to users
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSpec {
    pub id: String,
    pub display_name: String,
}

impl StationSpec {
    pub fn new(id: &str, display_name: &str) -> Self {
        Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("station registry is empty")]
    Empty,
    #[error("invalid station id '{0}' (expected 4 uppercase letters)")]
    InvalidId(String),
    #[error("station '{0}' is listed more than once")]
    Duplicate(String),
}

/// Airports queried by default, in display order
const DEFAULT_STATIONS: &[(&str, &str)] = &[
    ("KLAX", "Los Angeles (LAX)"),
    ("KORD", "Chicago (ORD)"),
    ("KMIA", "Miami (MIA)"),
    ("KAUS", "Austin (AUS)"),
    ("KIAH", "Houston (IAH)"),
    ("KSFO", "San Francisco (SFO)"),
    ("KSEA", "Seattle (SEA)"),
    ("KDEN", "Denver (DEN)"),
    ("KJFK", "New York (JFK)"),
    ("KDFW", "Dallas (DFW)"),
];

/// Ordered, validated set of stations. Order here is the output order.
#[derive(Debug, Clone)]
pub struct StationRegistry {
    stations: Vec<StationSpec>,
}

impl StationRegistry {
    pub fn new(stations: Vec<StationSpec>) -> Result<Self, RegistryError> {
        if stations.is_empty() {
            return Err(RegistryError::Empty);
        }

        for (i, station) in stations.iter().enumerate() {
            if !is_station_id(&station.id) {
                return Err(RegistryError::InvalidId(station.id.clone()));
            }
            if stations[..i].iter().any(|s| s.id == station.id) {
                return Err(RegistryError::Duplicate(station.id.clone()));
            }
        }

        Ok(Self { stations })
    }

    pub fn stations(&self) -> &[StationSpec] {
        &self.stations
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.stations.iter().map(|s| s.id.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.stations.iter().any(|s| s.id == id)
    }

    /// Comma-joined ids for the upstream `ids=` parameter
    pub fn ids_param(&self) -> String {
        self.ids().collect::<Vec<_>>().join(",")
    }
}

impl Default for StationRegistry {
    fn default() -> Self {
        Self {
            stations: DEFAULT_STATIONS
                .iter()
                .map(|&(id, name)| StationSpec::new(id, name))
                .collect(),
        }
    }
}

fn is_station_id(id: &str) -> bool {
    id.len() == 4 && id.bytes().all(|b| b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_order() {
        let registry = StationRegistry::default();
        assert_eq!(registry.len(), 10);
        assert_eq!(registry.stations()[0].id, "KLAX");
        assert_eq!(registry.stations()[9].id, "KDFW");
        assert!(registry.contains("KDEN"));
        assert!(StationRegistry::new(registry.stations().to_vec()).is_ok());
    }

    #[test]
    fn test_ids_param() {
        let registry = StationRegistry::new(vec![
            StationSpec::new("KAUS", "Austin"),
            StationSpec::new("KDEN", "Denver"),
        ])
        .unwrap();
        assert_eq!(registry.ids_param(), "KAUS,KDEN");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(StationRegistry::new(vec![]).unwrap_err(), RegistryError::Empty);
    }

    #[test]
    fn test_rejects_bad_ids() {
        for id in ["kaus", "KAU", "KAUSX", "K1T7", ""] {
            let err = StationRegistry::new(vec![StationSpec::new(id, "x")]).unwrap_err();
            assert_eq!(err, RegistryError::InvalidId(id.to_string()));
        }
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = StationRegistry::new(vec![
            StationSpec::new("KAUS", "Austin"),
            StationSpec::new("KDEN", "Denver"),
            StationSpec::new("KAUS", "Austin again"),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::Duplicate("KAUS".to_string()));
    }
}
