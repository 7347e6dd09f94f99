use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::core::granularity::{CalendarUnit, Granularity};
use crate::error::{TimelineError, TimelineResult};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Direction used when snapping a timestamp onto a granularity boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RoundingMode {
    /// Closest boundary; exact halves go up.
    #[default]
    Nearest,
    Up,
    Down,
}

impl RoundingMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RoundingMode {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest" => Ok(Self::Nearest),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(TimelineError::InvalidRoundingMode(other.to_owned())),
        }
    }
}

/// Wall-clock time elapsed since `time` was last on a whole `unit`.
///
/// `time_tail(05:23:56.5, Minute)` is 56.5 seconds, `time_tail(05:23:56, Day)`
/// is 5h 23m 56s. Computed in the timestamp's own offset, so day tails
/// measure from local midnight.
#[must_use]
pub fn time_tail(time: &DateTime<FixedOffset>, unit: CalendarUnit) -> TimeDelta {
    let local = time.naive_local();
    let whole_seconds = match unit {
        CalendarUnit::Second => 0,
        CalendarUnit::Minute => local.second(),
        CalendarUnit::Hour => local.minute() * 60 + local.second(),
        CalendarUnit::Day => local.num_seconds_from_midnight(),
    };
    TimeDelta::seconds(i64::from(whole_seconds))
        + TimeDelta::nanoseconds(i64::from(local.nanosecond()))
}

/// Calendar unit whose start anchors the rounding of `granularity`.
#[must_use]
pub const fn head_unit(granularity: Granularity) -> CalendarUnit {
    match granularity.base_unit() {
        CalendarUnit::Second => CalendarUnit::Minute,
        CalendarUnit::Minute => CalendarUnit::Hour,
        CalendarUnit::Hour | CalendarUnit::Day => CalendarUnit::Day,
    }
}

/// Snaps `time` onto a boundary of `granularity`.
///
/// The timestamp is split into a head (truncated to [`head_unit`]) and a
/// tail; the tail is rounded to a whole number of granularity units in
/// integer nanoseconds, so exact boundaries never move.
pub fn round_time(
    time: &DateTime<FixedOffset>,
    granularity: Granularity,
    mode: RoundingMode,
) -> TimelineResult<DateTime<FixedOffset>> {
    let tail = time_tail(time, head_unit(granularity));
    let tail_nanos = tail.num_nanoseconds().ok_or_else(|| {
        TimelineError::InvalidData("time tail does not fit in nanoseconds".to_owned())
    })?;
    let unit_seconds = granularity.seconds_per_unit();
    let unit_nanos = unit_seconds * NANOS_PER_SECOND;

    let floor = tail_nanos.div_euclid(unit_nanos);
    let remainder = tail_nanos.rem_euclid(unit_nanos);
    let count = match mode {
        RoundingMode::Down => floor,
        RoundingMode::Up => floor + i64::from(remainder != 0),
        RoundingMode::Nearest => floor + i64::from(remainder * 2 >= unit_nanos),
    };

    time.checked_sub_signed(tail)
        .and_then(|head| head.checked_add_signed(TimeDelta::seconds(count * unit_seconds)))
        .ok_or_else(|| {
            TimelineError::InvalidData(format!(
                "rounding {time} to {granularity} leaves the representable range"
            ))
        })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta};

    use super::{RoundingMode, round_time, time_tail};
    use crate::core::granularity::{CalendarUnit, Granularity};
    use crate::error::TimelineError;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        NaiveDate::from_ymd_opt(2013, 2, 3)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .expect("valid time")
            .and_utc()
            .fixed_offset()
    }

    #[test]
    fn tail_counts_from_the_start_of_the_unit() {
        let time = at(5, 23, 56);
        assert_eq!(time_tail(&time, CalendarUnit::Minute), TimeDelta::seconds(56));
        assert_eq!(
            time_tail(&time, CalendarUnit::Hour),
            TimeDelta::seconds(23 * 60 + 56)
        );
        assert_eq!(time_tail(&time, CalendarUnit::Second), TimeDelta::zero());
    }

    #[test]
    fn composite_granularity_rounds_within_the_hour() {
        let time = at(5, 23, 56);
        let down = round_time(&time, Granularity::FifteenMinutes, RoundingMode::Down)
            .expect("in range");
        let up = round_time(&time, Granularity::FifteenMinutes, RoundingMode::Up)
            .expect("in range");
        assert_eq!(down, at(5, 15, 0));
        assert_eq!(up, at(5, 30, 0));
    }

    #[test]
    fn rounding_up_an_exact_boundary_keeps_it() {
        let time = at(6, 0, 0);
        for granularity in [Granularity::Hour, Granularity::TwoHours, Granularity::Minute] {
            let up = round_time(&time, granularity, RoundingMode::Up).expect("in range");
            assert_eq!(up, time);
        }
    }

    #[test]
    fn unknown_mode_name_fails_fast() {
        let err = "sideways"
            .parse::<RoundingMode>()
            .expect_err("mode should be rejected");
        assert!(matches!(err, TimelineError::InvalidRoundingMode(_)));
    }
}
