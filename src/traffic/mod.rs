//! Time-windowed station traffic.
//!
//! Trips are bucketed by minute of day once. Each filter change selects a
//! 120 minute window of buckets (or all of them), counts departures and
//! arrivals per station, and maps the counts to marker radius and flow
//! style.

pub mod aggregate;
pub mod bucket;
pub mod handler;
pub mod scale;
pub mod types;
pub mod window;

pub use aggregate::TrafficState;
pub use handler::{FilterHandler, MarkerSink};
pub use types::{MarkerFrame, StationMarker};
