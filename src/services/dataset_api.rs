//! Trait for the two bike-share datasets and the joined load built on it.

use anyhow::Result;
use bike_traffic::model::{Station, Trip};
use bike_traffic::traffic::TrafficState;
use tracing::info;

/// Abstraction over wherever station metadata and the trip log come from.
#[async_trait::async_trait]
pub trait DatasetApi: Send + Sync {
    async fn fetch_stations(&self) -> Result<Vec<Station>>;

    async fn fetch_trips(&self) -> Result<Vec<Trip>>;
}

/// Loads both datasets concurrently and buckets the trips.
///
/// Nothing is bucketed unless both loads succeed.
#[tracing::instrument(skip(api))]
pub async fn load_state<A: DatasetApi + ?Sized>(api: &A) -> Result<TrafficState> {
    let (stations, trips) = tokio::try_join!(api.fetch_stations(), api.fetch_trips())?;

    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Datasets loaded"
    );

    Ok(TrafficState::new(stations, trips))
}
