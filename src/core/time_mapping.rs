//! Conversions between axis indices and absolute timestamps.
//!
//! The global axis index counts days since the Unix epoch (UTC). A local
//! index counts units of one granularity since the epoch, so its integer
//! values are exactly the UTC-aligned boundaries of that granularity.

use chrono::{DateTime, FixedOffset, Utc};

use crate::core::granularity::{Granularity, SECONDS_PER_DAY};
use crate::core::time_zone::AxisTimeZone;
use crate::error::{TimelineError, TimelineResult};

const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Converts fractional seconds since the epoch into an instant.
pub fn instant_from_epoch_seconds(seconds: f64) -> TimelineResult<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(TimelineError::InvalidData(
            "epoch seconds must be finite".to_owned(),
        ));
    }

    let mut whole = seconds.floor();
    let mut nanos = ((seconds - whole) * NANOS_PER_SECOND).round();
    if nanos >= NANOS_PER_SECOND {
        whole += 1.0;
        nanos = 0.0;
    }
    if whole > i64::MAX as f64 || whole < i64::MIN as f64 {
        return Err(TimelineError::InvalidData(format!(
            "epoch seconds {seconds} are out of range"
        )));
    }

    DateTime::<Utc>::from_timestamp(whole as i64, nanos as u32).ok_or_else(|| {
        TimelineError::InvalidData(format!("epoch seconds {seconds} are out of range"))
    })
}

/// Fractional seconds since the epoch; the offset of `time` does not matter.
#[must_use]
pub fn epoch_seconds_of(time: &DateTime<FixedOffset>) -> f64 {
    time.timestamp() as f64 + f64::from(time.timestamp_subsec_nanos()) / NANOS_PER_SECOND
}

/// Timestamp of `local_index` units of `granularity` past the epoch, in `tz`.
pub fn timestamp_of(
    local_index: f64,
    granularity: Granularity,
    tz: &impl AxisTimeZone,
) -> TimelineResult<DateTime<FixedOffset>> {
    let seconds = local_index * granularity.seconds_per_unit() as f64;
    let instant = instant_from_epoch_seconds(seconds)?;
    Ok(tz.to_local(instant))
}

/// Local index of `time` for `granularity`.
#[must_use]
pub fn local_index_of(time: &DateTime<FixedOffset>, granularity: Granularity) -> f64 {
    epoch_seconds_of(time) / granularity.seconds_per_unit() as f64
}

/// Whole epoch seconds of a local index, rounded to the nearest second.
///
/// Ticks of different granularities that land on the same second share
/// this key.
#[must_use]
pub fn to_epoch_seconds(local_index: f64, granularity: Granularity) -> i64 {
    (local_index * granularity.seconds_per_unit() as f64).round() as i64
}

/// Rescales a granularity-local index onto the day-based axis index.
#[must_use]
pub fn global_index_of(local_index: f64, granularity: Granularity) -> f64 {
    local_index * granularity.seconds_per_unit() as f64 / SECONDS_PER_DAY as f64
}

/// Rescales a day-based axis index into a granularity-local index.
#[must_use]
pub fn localize_index(global_index: f64, granularity: Granularity) -> f64 {
    global_index * granularity.day_subdivision_factor() as f64
}

/// Axis index of `time`.
#[must_use]
pub fn global_index_of_time(time: &DateTime<FixedOffset>) -> f64 {
    epoch_seconds_of(time) / SECONDS_PER_DAY as f64
}

/// Timestamp at axis index `global_index`, in `tz`.
pub fn time_of_global_index(
    global_index: f64,
    tz: &impl AxisTimeZone,
) -> TimelineResult<DateTime<FixedOffset>> {
    timestamp_of(global_index, Granularity::Day, tz)
}
