use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

use bike_traffic::config::DatasetConfig;
use bike_traffic::fetch::{BasicClient, HttpClient, load_source};
use bike_traffic::model::{Station, Trip};
use bike_traffic::parser::{parse_stations, parse_trips};

use crate::services::dataset_api::DatasetApi;

/// Loads the datasets from the URLs or paths in a [`DatasetConfig`].
pub struct SourceDataset<C = BasicClient> {
    client: C,
    config: DatasetConfig,
}

impl SourceDataset<BasicClient> {
    pub fn new(config: DatasetConfig) -> Result<Self> {
        let client = BasicClient::new(config.timeout)?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl<C: HttpClient> DatasetApi for SourceDataset<C> {
    #[tracing::instrument(skip(self))]
    async fn fetch_stations(&self) -> Result<Vec<Station>> {
        debug!(source = %self.config.stations, "Loading stations");
        let bytes = load_source(&self.client, &self.config.stations).await?;
        let stations = parse_stations(&bytes)?;
        debug!(count = stations.len(), "Stations parsed");
        Ok(stations)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_trips(&self) -> Result<Vec<Trip>> {
        debug!(source = %self.config.trips, "Loading trips");
        let bytes = load_source(&self.client, &self.config.trips).await?;
        let trips = parse_trips(bytes.as_slice())?;
        debug!(count = trips.len(), "Trips parsed");
        Ok(trips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dataset_api::load_state;
    use std::time::Duration;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", std::env::temp_dir().display(), name)
    }

    fn config(stations: &str, trips: &str) -> DatasetConfig {
        DatasetConfig {
            stations: stations.to_string(),
            trips: trips.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_loads_local_files() {
        let stations = temp_path("bike_traffic_infra_stations.json");
        let trips = temp_path("bike_traffic_infra_trips.csv");
        std::fs::write(
            &stations,
            r#"{"data":{"stations":[{"short_name":"A","lon":-71.0,"lat":42.0}]}}"#,
        )
        .unwrap();
        std::fs::write(
            &trips,
            "start_station_id,end_station_id,started_at,ended_at\nA,A,2024-03-01 08:00:00,2024-03-01 08:30:00\n",
        )
        .unwrap();

        let dataset = SourceDataset::new(config(&stations, &trips)).unwrap();
        let state = load_state(&dataset).await.unwrap();
        assert_eq!(state.stations()[0].traffic.total(), 2);

        std::fs::remove_file(&stations).unwrap();
        std::fs::remove_file(&trips).unwrap();
    }

    #[tokio::test]
    async fn test_missing_trip_log_fails() {
        let stations = temp_path("bike_traffic_infra_stations_only.json");
        std::fs::write(&stations, r#"{"data":{"stations":[]}}"#).unwrap();

        let dataset = SourceDataset::new(config(
            &stations,
            &temp_path("bike_traffic_infra_missing.csv"),
        ))
        .unwrap();
        assert!(load_state(&dataset).await.is_err());

        std::fs::remove_file(&stations).unwrap();
    }
}
