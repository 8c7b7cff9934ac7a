//! Visual encodings derived from station traffic.

use crate::model::{TimeFilter, Traffic};

/// Radius range used when no time window is active.
pub const UNFILTERED_RANGE: (f64, f64) = (0.0, 25.0);
/// Radius range used under a time window. Fewer trips, so a wider spread.
pub const WINDOWED_RANGE: (f64, f64) = (3.0, 50.0);

/// Square-root scale from traffic to marker radius, so marker area tracks
/// traffic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl RadiusScale {
    pub fn new(max_traffic: usize, range: (f64, f64)) -> Self {
        Self {
            domain: (0.0, max_traffic as f64),
            range,
        }
    }

    /// Scale for the given filter mode over `[0, max_traffic]`.
    pub fn for_filter(filter: TimeFilter, max_traffic: usize) -> Self {
        let range = if filter.is_windowed() {
            WINDOWED_RANGE
        } else {
            UNFILTERED_RANGE
        };
        Self::new(max_traffic, range)
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A collapsed domain maps everything to the middle of the range.
    pub fn radius(&self, traffic: usize) -> f64 {
        let (d0, d1) = (self.domain.0.sqrt(), self.domain.1.sqrt());
        let (r0, r1) = self.range;
        let span = d1 - d0;

        let t = if span == 0.0 {
            0.5
        } else {
            ((traffic as f64).sqrt() - d0) / span
        };
        r0 + t * (r1 - r0)
    }
}

/// Departure share of a station's traffic, quantized into three styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRatio {
    /// Mostly arrivals.
    Arrivals,
    Balanced,
    /// Mostly departures.
    Departures,
}

impl FlowRatio {
    /// Share of departures; 0.5 for a station with no traffic.
    pub fn raw(traffic: &Traffic) -> f64 {
        if traffic.total() == 0 {
            0.5
        } else {
            traffic.departures() as f64 / traffic.total() as f64
        }
    }

    /// Three equal buckets over `[0, 1]`; a breakpoint belongs to the
    /// bucket above it.
    pub fn quantize(ratio: f64) -> Self {
        if ratio < 1.0 / 3.0 {
            FlowRatio::Arrivals
        } else if ratio < 2.0 / 3.0 {
            FlowRatio::Balanced
        } else {
            FlowRatio::Departures
        }
    }

    pub fn from_traffic(traffic: &Traffic) -> Self {
        Self::quantize(Self::raw(traffic))
    }

    /// Style value handed to the renderer: 0, 0.5 or 1.
    pub fn value(self) -> f64 {
        match self {
            FlowRatio::Arrivals => 0.0,
            FlowRatio::Balanced => 0.5,
            FlowRatio::Departures => 1.0,
        }
    }
}

pub fn tooltip(traffic: &Traffic) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        traffic.total(),
        traffic.departures(),
        traffic.arrivals()
    )
}
