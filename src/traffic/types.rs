//! Data types handed to the rendering side.

use serde::Serialize;

/// Everything a renderer needs to draw one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationMarker {
    pub short_name: String,
    pub name: Option<String>,
    pub station_id: Option<String>,
    pub capacity: Option<u32>,
    pub lon: f64,
    pub lat: f64,
    pub radius: f64,
    /// Quantized departure share: 0, 0.5 or 1.
    pub flow_ratio: f64,
    pub departures: usize,
    pub arrivals: usize,
    pub total_traffic: usize,
    pub tooltip: String,
}

/// One recomputed frame: the filter it was computed under and its markers.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerFrame {
    pub time_filter: i32,
    pub label: String,
    pub markers: Vec<StationMarker>,
}
