use std::collections::HashMap;

use tracing::debug;

use super::bucket::{MinuteBuckets, Side};
use super::scale::{FlowRatio, RadiusScale, tooltip};
use super::types::StationMarker;
use super::window::select;
use crate::model::{Station, TimeFilter, Traffic, Trip};

/// All mutable aggregation state: the bucketed trip log, the stations and
/// the filter their traffic was last computed under.
#[derive(Debug)]
pub struct TrafficState {
    buckets: MinuteBuckets,
    stations: Vec<Station>,
    filter: TimeFilter,
}

impl TrafficState {
    /// Buckets `trips` and computes unfiltered traffic for every station.
    pub fn new(stations: Vec<Station>, trips: Vec<Trip>) -> Self {
        let mut state = Self {
            buckets: MinuteBuckets::new(trips),
            stations,
            filter: TimeFilter::Any,
        };
        state.recompute();
        state
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn buckets(&self) -> &MinuteBuckets {
        &self.buckets
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    /// Switches to `filter` and recomputes traffic for every station.
    pub fn set_filter(&mut self, filter: TimeFilter) -> &[Station] {
        self.filter = filter;
        self.recompute();
        &self.stations
    }

    fn recompute(&mut self) {
        let departures = count_by(
            select(&self.buckets, Side::Departures, self.filter),
            |t| &t.start_station_id,
        );
        let arrivals = count_by(
            select(&self.buckets, Side::Arrivals, self.filter),
            |t| &t.end_station_id,
        );

        for station in &mut self.stations {
            let id = station.short_name.as_str();
            station.traffic = Traffic::new(
                departures.get(id).copied().unwrap_or(0),
                arrivals.get(id).copied().unwrap_or(0),
            );
        }

        debug!(
            filter = self.filter.slider_value(),
            departure_groups = departures.len(),
            arrival_groups = arrivals.len(),
            "Station traffic recomputed"
        );
    }

    pub fn max_traffic(&self) -> usize {
        self.stations
            .iter()
            .map(|s| s.traffic.total())
            .max()
            .unwrap_or(0)
    }

    pub fn radius_scale(&self) -> RadiusScale {
        RadiusScale::for_filter(self.filter, self.max_traffic())
    }

    /// Markers for the current filter, one per station.
    pub fn markers(&self) -> Vec<StationMarker> {
        let scale = self.radius_scale();

        self.stations
            .iter()
            .map(|s| StationMarker {
                short_name: s.short_name.clone(),
                name: s.name.clone(),
                station_id: s.station_id.clone(),
                capacity: s.capacity,
                lon: s.lon,
                lat: s.lat,
                radius: scale.radius(s.traffic.total()),
                flow_ratio: FlowRatio::from_traffic(&s.traffic).value(),
                departures: s.traffic.departures(),
                arrivals: s.traffic.arrivals(),
                total_traffic: s.traffic.total(),
                tooltip: tooltip(&s.traffic),
            })
            .collect()
    }
}

fn count_by<'a>(
    trips: Vec<&'a Trip>,
    key: impl Fn(&'a Trip) -> &'a String,
) -> HashMap<&'a str, usize> {
    let mut counts = HashMap::new();
    for trip in trips {
        *counts.entry(key(trip).as_str()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MinuteOfDay;

    fn trip(from: &str, to: &str, start: u16, end: u16) -> Trip {
        Trip::new(
            from,
            to,
            MinuteOfDay::new(start).unwrap(),
            MinuteOfDay::new(end).unwrap(),
        )
    }

    fn fixture() -> TrafficState {
        let stations = vec![
            Station::new("A", -71.0, 42.0),
            Station::new("B", -71.1, 42.1),
            Station::new("C", -71.2, 42.2),
        ];
        let trips = vec![
            trip("A", "B", 480, 495),
            trip("A", "B", 500, 510),
            trip("B", "A", 1430, 10),
            trip("A", "C", 20, 45),
            trip("B", "B", 900, 930),
        ];
        TrafficState::new(stations, trips)
    }

    fn counts(state: &TrafficState) -> Vec<(usize, usize)> {
        state
            .stations()
            .iter()
            .map(|s| (s.traffic.departures(), s.traffic.arrivals()))
            .collect()
    }

    #[test]
    fn test_unfiltered_counts() {
        let state = fixture();
        assert_eq!(counts(&state), vec![(3, 1), (2, 3), (0, 1)]);
        assert_eq!(state.max_traffic(), 5);
    }

    #[test]
    fn test_windowed_counts() {
        let mut state = fixture();

        state.set_filter(TimeFilter::try_from(500).unwrap());
        assert_eq!(counts(&state), vec![(2, 0), (0, 2), (0, 0)]);

        state.set_filter(TimeFilter::try_from(30).unwrap());
        assert_eq!(counts(&state), vec![(1, 1), (1, 0), (0, 1)]);
    }

    #[test]
    fn test_recompute_replaces_previous_counts() {
        let mut state = fixture();
        state.set_filter(TimeFilter::try_from(900).unwrap());
        state.set_filter(TimeFilter::Any);
        assert_eq!(counts(&state), vec![(3, 1), (2, 3), (0, 1)]);
    }

    #[test]
    fn test_station_sums_match_selection() {
        let mut state = fixture();
        for f in [-1, 0, 30, 480, 500, 900, 1380, 1439] {
            let filter = TimeFilter::try_from(f).unwrap();
            state.set_filter(filter);

            let departures: usize = state.stations().iter().map(|s| s.traffic.departures()).sum();
            let arrivals: usize = state.stations().iter().map(|s| s.traffic.arrivals()).sum();
            assert_eq!(departures, select(state.buckets(), Side::Departures, filter).len());
            assert_eq!(arrivals, select(state.buckets(), Side::Arrivals, filter).len());

            for s in state.stations() {
                assert_eq!(s.traffic.total(), s.traffic.departures() + s.traffic.arrivals());
            }
        }
    }

    #[test]
    fn test_unknown_station_ids_are_not_counted() {
        let state = TrafficState::new(
            vec![Station::new("A", 0.0, 0.0)],
            vec![trip("A", "", 10, 20), trip("Z", "A", 10, 20)],
        );
        assert_eq!(counts(&state), vec![(1, 1)]);
    }

    #[test]
    fn test_markers_carry_station_metadata() {
        let station = Station {
            name: Some("Kendall T".to_string()),
            station_id: Some("st-2".to_string()),
            capacity: Some(23),
            ..Station::new("B32012", -71.08, 42.36)
        };
        let state = TrafficState::new(vec![station], Vec::new());

        let marker = &state.markers()[0];
        assert_eq!(marker.name.as_deref(), Some("Kendall T"));
        assert_eq!(marker.station_id.as_deref(), Some("st-2"));
        assert_eq!(marker.capacity, Some(23));
    }

    #[test]
    fn test_markers_follow_mode() {
        let mut state = fixture();
        let markers = state.markers();
        assert_eq!(markers.len(), 3);
        // B is the busiest station
        assert_eq!(markers[1].radius, 25.0);
        assert_eq!(markers[1].tooltip, "5 trips (2 departures, 3 arrivals)");
        assert_eq!(markers[0].flow_ratio, 1.0);
        assert_eq!(markers[2].flow_ratio, 0.0);

        state.set_filter(TimeFilter::try_from(500).unwrap());
        let markers = state.markers();
        assert_eq!(state.radius_scale().range(), (3.0, 50.0));
        assert_eq!(markers[2].radius, 3.0);
        assert_eq!(markers[2].flow_ratio, 0.5);
        assert_eq!(markers[0].radius, 50.0);

        state.set_filter(TimeFilter::Any);
        assert_eq!(state.radius_scale().range(), (0.0, 25.0));
    }
}
