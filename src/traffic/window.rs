use std::ops::Range;

use super::bucket::{MinuteBuckets, Side};
use crate::model::{MINUTES_PER_DAY, TimeFilter, Trip};

/// Minutes on either side of the filter center.
pub const WINDOW_RADIUS_MINUTES: u16 = 60;

/// Bucket ranges covered by `filter`.
///
/// Windows are start-inclusive and end-exclusive over minute indices. A
/// window that crosses midnight comes back as two ranges, the late one first.
pub fn window_ranges(filter: TimeFilter) -> Vec<Range<usize>> {
    let day = MINUTES_PER_DAY as usize;
    let center = match filter {
        TimeFilter::Any => return vec![0..day],
        TimeFilter::Window(m) => m.index(),
    };
    let radius = WINDOW_RADIUS_MINUTES as usize;

    let min_minute = (center + day - radius) % day;
    let max_minute = (center + radius) % day;

    if min_minute > max_minute {
        vec![min_minute..day, 0..max_minute]
    } else {
        vec![min_minute..max_minute]
    }
}

/// Flattens the buckets selected by `filter` on one side.
pub fn select<'a>(buckets: &'a MinuteBuckets, side: Side, filter: TimeFilter) -> Vec<&'a Trip> {
    window_ranges(filter)
        .into_iter()
        .flatten()
        .flat_map(|minute| buckets.bucket(side, minute))
        .collect()
}
