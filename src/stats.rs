use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::traffic::TrafficState;
use crate::traffic::scale::FlowRatio;

#[derive(Debug, Default, Serialize)]
pub struct TrafficSummary {
    pub timestamp: DateTime<Utc>,
    pub time_filter: i32,
    pub label: String,

    // trip counts under the filter
    pub departures: usize,
    pub arrivals: usize,

    // station breakdown
    pub stations: usize,
    pub active_stations: usize,
    pub departure_heavy: usize,
    pub balanced: usize,
    pub arrival_heavy: usize,

    pub busiest_station: Option<String>,
    pub busiest_traffic: usize,
    pub mean_traffic: f64,
}

impl TrafficSummary {
    pub fn from_state(state: &TrafficState) -> Self {
        let filter = state.filter();
        let mut s = TrafficSummary {
            timestamp: Utc::now(),
            time_filter: filter.slider_value(),
            label: filter.label(),
            stations: state.stations().len(),
            ..Default::default()
        };

        let mut total = 0;
        for station in state.stations() {
            let traffic = &station.traffic;
            s.departures += traffic.departures();
            s.arrivals += traffic.arrivals();
            total += traffic.total();

            if traffic.total() == 0 {
                continue;
            }
            s.active_stations += 1;

            match FlowRatio::from_traffic(traffic) {
                FlowRatio::Departures => s.departure_heavy += 1,
                FlowRatio::Balanced => s.balanced += 1,
                FlowRatio::Arrivals => s.arrival_heavy += 1,
            }

            if traffic.total() > s.busiest_traffic {
                s.busiest_traffic = traffic.total();
                s.busiest_station = Some(station.short_name.clone());
            }
        }

        s.mean_traffic = if s.stations == 0 {
            0.0
        } else {
            total as f64 / s.stations as f64
        };

        s
    }

    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of stations with any traffic under the filter.
    pub fn active_pct(&self) -> f64 {
        Self::pct(self.active_stations, self.stations)
    }
}
