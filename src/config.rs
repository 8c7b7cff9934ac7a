use anyhow::{Context, Result};
use std::time::Duration;

pub const DEFAULT_STATIONS_URL: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
pub const DEFAULT_TRIPS_URL: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the two datasets come from.
///
/// Read from the environment (a `.env` file is loaded by the binary first),
/// then overridden per command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetConfig {
    pub stations: String,
    pub trips: String,
    pub timeout: Duration,
}

impl DatasetConfig {
    /// Reads `STATIONS_URL`, `TRIPS_URL` and `HTTP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("HTTP_TIMEOUT_SECS must be whole seconds, got '{v}'"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            stations: lookup("STATIONS_URL").unwrap_or_else(|| DEFAULT_STATIONS_URL.to_string()),
            trips: lookup("TRIPS_URL").unwrap_or_else(|| DEFAULT_TRIPS_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }

    /// Replaces whichever sources were given on the command line.
    pub fn with_overrides(mut self, stations: Option<String>, trips: Option<String>) -> Self {
        if let Some(stations) = stations {
            self.stations = stations;
        }
        if let Some(trips) = trips {
            self.trips = trips;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DatasetConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.stations, DEFAULT_STATIONS_URL);
        assert_eq!(config.trips, DEFAULT_TRIPS_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_values() {
        let config = DatasetConfig::from_lookup(lookup(&[
            ("STATIONS_URL", "stations.json"),
            ("HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.stations, "stations.json");
        assert_eq!(config.trips, DEFAULT_TRIPS_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout() {
        assert!(DatasetConfig::from_lookup(lookup(&[("HTTP_TIMEOUT_SECS", "soon")])).is_err());
    }

    #[test]
    fn test_overrides() {
        let config = DatasetConfig::from_lookup(lookup(&[]))
            .unwrap()
            .with_overrides(None, Some("trips.csv.gz".to_string()));
        assert_eq!(config.stations, DEFAULT_STATIONS_URL);
        assert_eq!(config.trips, "trips.csv.gz");
    }
}
