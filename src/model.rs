//! Core records: stations, trips, minute-of-day and the slider time filter.

use anyhow::{Result, bail};
use chrono::{NaiveTime, Timelike};
use std::fmt;
use std::str::FromStr;

/// Number of minute buckets in a day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A minute of the day in `[0, 1440)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Returns `None` when `minute` is outside `[0, 1440)`.
    pub fn new(minute: u16) -> Option<Self> {
        (minute < MINUTES_PER_DAY).then_some(Self(minute))
    }

    /// Minute of day from the hour and minute components of `time`.
    /// Seconds and below are dropped.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        Self((time.hour() * 60 + time.minute()) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// The slider-controlled filter.
///
/// The slider reports `-1` for "any time" and a minute of day otherwise.
/// A concrete minute is the center of a ±60 minute window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFilter {
    #[default]
    Any,
    Window(MinuteOfDay),
}

impl TimeFilter {
    pub fn is_windowed(self) -> bool {
        matches!(self, TimeFilter::Window(_))
    }

    /// The raw slider value this filter corresponds to.
    pub fn slider_value(self) -> i32 {
        match self {
            TimeFilter::Any => -1,
            TimeFilter::Window(m) => m.get() as i32,
        }
    }

    /// Human-readable label shown next to the slider, e.g. `"8:20 AM"`.
    pub fn label(self) -> String {
        match self {
            TimeFilter::Any => "(any time)".to_string(),
            TimeFilter::Window(m) => {
                match NaiveTime::from_hms_opt((m.get() / 60).into(), (m.get() % 60).into(), 0) {
                    Some(t) => t.format("%-I:%M %p").to_string(),
                    None => m.to_string(),
                }
            }
        }
    }
}

impl TryFrom<i32> for TimeFilter {
    type Error = anyhow::Error;

    fn try_from(value: i32) -> Result<Self> {
        if value == -1 {
            return Ok(TimeFilter::Any);
        }
        match u16::try_from(value).ok().and_then(MinuteOfDay::new) {
            Some(m) => Ok(TimeFilter::Window(m)),
            None => bail!("time filter {value} is outside [-1, 1439]"),
        }
    }
}

impl FromStr for TimeFilter {
    type Err = anyhow::Error;

    /// Accepts `-1`, `any`, a minute of day, or a 24-hour `HH:MM`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(TimeFilter::Any);
        }
        if let Ok(value) = s.parse::<i32>() {
            return TimeFilter::try_from(value);
        }
        match NaiveTime::parse_from_str(s, "%H:%M") {
            Ok(t) => Ok(TimeFilter::Window(MinuteOfDay::from_time(&t))),
            Err(_) => bail!("unrecognized time filter '{s}'"),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Per-station traffic under the current filter.
///
/// Only constructible from departures and arrivals so the total can never
/// drift from its parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Traffic {
    departures: usize,
    arrivals: usize,
    total: usize,
}

impl Traffic {
    pub fn new(departures: usize, arrivals: usize) -> Self {
        Self {
            departures,
            arrivals,
            total: departures + arrivals,
        }
    }

    pub fn departures(&self) -> usize {
        self.departures
    }

    pub fn arrivals(&self) -> usize {
        self.arrivals
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// A bike-share dock.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub short_name: String,
    pub name: Option<String>,
    pub station_id: Option<String>,
    pub capacity: Option<u32>,
    pub lon: f64,
    pub lat: f64,
    pub traffic: Traffic,
}

impl Station {
    pub fn new(short_name: impl Into<String>, lon: f64, lat: f64) -> Self {
        Self {
            short_name: short_name.into(),
            name: None,
            station_id: None,
            capacity: None,
            lon,
            lat,
            traffic: Traffic::default(),
        }
    }
}

/// One rental, resolved to the minutes it started and ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trip {
    pub ride_id: Option<String>,
    pub rideable_type: Option<String>,
    pub start_station_id: String,
    pub end_station_id: String,
    pub start_minute: MinuteOfDay,
    pub end_minute: MinuteOfDay,
}

impl Trip {
    pub fn new(
        start_station_id: impl Into<String>,
        end_station_id: impl Into<String>,
        start_minute: MinuteOfDay,
        end_minute: MinuteOfDay,
    ) -> Self {
        Self {
            ride_id: None,
            rideable_type: None,
            start_station_id: start_station_id.into(),
            end_station_id: end_station_id.into(),
            start_minute,
            end_minute,
        }
    }
}
