//! Decoders for the station JSON feed and the trip CSV log.

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use std::io::Read;

use crate::model::{MinuteOfDay, Station, Trip};

#[derive(Deserialize)]
struct StationFeed {
    data: StationData,
}

#[derive(Deserialize)]
struct StationData {
    stations: Vec<StationRecord>,
}

#[derive(Deserialize)]
struct StationRecord {
    short_name: String,
    lon: f64,
    lat: f64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    station_id: Option<String>,
    #[serde(default)]
    capacity: Option<u32>,
}

/// One row of the trip log. Columns beyond these are ignored.
#[derive(Deserialize)]
struct TripRecord {
    #[serde(default)]
    ride_id: Option<String>,
    #[serde(default)]
    rideable_type: Option<String>,
    start_station_id: String,
    end_station_id: String,
    started_at: String,
    ended_at: String,
}

/// Decodes a station feed shaped as `{ "data": { "stations": [...] } }`.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON of that shape, or a station
/// lacks `short_name`, `lon` or `lat`.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let feed: StationFeed =
        serde_json::from_slice(bytes).context("station feed is not valid station JSON")?;

    Ok(feed
        .data
        .stations
        .into_iter()
        .map(|r| Station {
            name: r.name,
            station_id: r.station_id,
            capacity: r.capacity,
            ..Station::new(r.short_name, r.lon, r.lat)
        })
        .collect())
}

/// Decodes a trip log from CSV with a header row.
///
/// # Errors
///
/// Fails on the first row that is missing a required column or carries a
/// timestamp that does not parse, naming the row. No trips are returned in
/// that case.
pub fn parse_trips<R: Read>(reader: R) -> Result<Vec<Trip>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        // header is line 1
        let line = i + 2;
        let record: TripRecord = result.with_context(|| format!("trip row {line} is malformed"))?;

        let start_minute = parse_minute(&record.started_at)
            .with_context(|| format!("trip row {line}: bad started_at"))?;
        let end_minute = parse_minute(&record.ended_at)
            .with_context(|| format!("trip row {line}: bad ended_at"))?;

        trips.push(Trip {
            ride_id: record.ride_id.filter(|s| !s.is_empty()),
            rideable_type: record.rideable_type.filter(|s| !s.is_empty()),
            start_station_id: record.start_station_id,
            end_station_id: record.end_station_id,
            start_minute,
            end_minute,
        });
    }

    Ok(trips)
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Resolves a timestamp to its minute of day, using the wall-clock time as
/// written.
pub fn parse_minute(timestamp: &str) -> Result<MinuteOfDay> {
    let timestamp = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(MinuteOfDay::from_time(&dt.naive_local()));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(timestamp, fmt).ok())
        .map(|dt| MinuteOfDay::from_time(&dt))
        .ok_or_else(|| anyhow!("unparseable timestamp '{timestamp}'"))
}
