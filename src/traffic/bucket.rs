use crate::model::{MINUTES_PER_DAY, Trip};

/// Trips partitioned by the minute of day they started and ended.
///
/// Each table holds 1440 lists of indices into `trips`. Built once; never
/// mutated afterwards.
#[derive(Debug)]
pub struct MinuteBuckets {
    trips: Vec<Trip>,
    departures_by_minute: Vec<Vec<usize>>,
    arrivals_by_minute: Vec<Vec<usize>>,
}

/// Which side of a trip a bucket table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Departures,
    Arrivals,
}

impl MinuteBuckets {
    pub fn new(trips: Vec<Trip>) -> Self {
        let mut departures_by_minute = vec![Vec::new(); MINUTES_PER_DAY as usize];
        let mut arrivals_by_minute = vec![Vec::new(); MINUTES_PER_DAY as usize];

        for (i, trip) in trips.iter().enumerate() {
            departures_by_minute[trip.start_minute.index()].push(i);
            arrivals_by_minute[trip.end_minute.index()].push(i);
        }

        Self {
            trips,
            departures_by_minute,
            arrivals_by_minute,
        }
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Trips in the bucket for `minute` on the given side.
    pub fn bucket(&self, side: Side, minute: usize) -> impl Iterator<Item = &Trip> + '_ {
        let table = match side {
            Side::Departures => &self.departures_by_minute,
            Side::Arrivals => &self.arrivals_by_minute,
        };
        table[minute].iter().map(|&i| &self.trips[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MinuteOfDay;

    fn minute(m: u16) -> MinuteOfDay {
        MinuteOfDay::new(m).unwrap()
    }

    #[test]
    fn test_every_trip_in_one_bucket_per_side() {
        let trips = vec![
            Trip::new("A", "B", minute(0), minute(15)),
            Trip::new("B", "A", minute(0), minute(1439)),
            Trip::new("C", "A", minute(720), minute(15)),
        ];
        let buckets = MinuteBuckets::new(trips);

        let count = |side| {
            (0..MINUTES_PER_DAY as usize)
                .map(|m| buckets.bucket(side, m).count())
                .sum::<usize>()
        };
        assert_eq!(count(Side::Departures), 3);
        assert_eq!(count(Side::Arrivals), 3);

        assert_eq!(buckets.bucket(Side::Departures, 0).count(), 2);
        assert_eq!(buckets.bucket(Side::Arrivals, 15).count(), 2);
        assert_eq!(
            buckets.bucket(Side::Arrivals, 1439).next().unwrap().start_station_id,
            "B"
        );
    }

    #[test]
    fn test_empty_log() {
        let buckets = MinuteBuckets::new(Vec::new());
        assert!(buckets.is_empty());
        assert_eq!(buckets.bucket(Side::Departures, 100).count(), 0);
    }
}
