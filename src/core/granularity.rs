use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{TimelineError, TimelineResult};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Thickness and length of a tick symbol, in logical pixels.
///
/// Thickness runs along the axis, length across it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickSize {
    pub thickness: f64,
    pub length: f64,
}

impl TickSize {
    #[must_use]
    pub const fn new(thickness: f64, length: f64) -> Self {
        Self { thickness, length }
    }
}

/// One of the fixed tick resolutions supported by the time axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Granularity {
    Day,
    TwelveHours,
    SixHours,
    FourHours,
    TwoHours,
    Hour,
    ThirtyMinutes,
    FifteenMinutes,
    TenMinutes,
    FiveMinutes,
    Minute,
    ThirtySeconds,
    FifteenSeconds,
    TenSeconds,
    FiveSeconds,
    Second,
}

/// Calendar unit a granularity counts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CalendarUnit {
    Second,
    Minute,
    Hour,
    Day,
}

impl CalendarUnit {
    #[must_use]
    pub const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => SECONDS_PER_DAY,
        }
    }
}

impl Granularity {
    /// Every granularity, coarsest first.
    pub const ALL: [Granularity; 16] = [
        Self::Day,
        Self::TwelveHours,
        Self::SixHours,
        Self::FourHours,
        Self::TwoHours,
        Self::Hour,
        Self::ThirtyMinutes,
        Self::FifteenMinutes,
        Self::TenMinutes,
        Self::FiveMinutes,
        Self::Minute,
        Self::ThirtySeconds,
        Self::FifteenSeconds,
        Self::TenSeconds,
        Self::FiveSeconds,
        Self::Second,
    ];

    /// Default tick set: 1 day, 4 hours, 1 hour, 15 minutes, 5 minutes,
    /// 1 minute, 15 seconds, 5 seconds and 1 second.
    pub const SELECTED: [Granularity; 9] = [
        Self::Day,
        Self::FourHours,
        Self::Hour,
        Self::FifteenMinutes,
        Self::FiveMinutes,
        Self::Minute,
        Self::FifteenSeconds,
        Self::FiveSeconds,
        Self::Second,
    ];

    pub fn from_name(name: &str) -> TimelineResult<Self> {
        Self::ALL
            .into_iter()
            .find(|granularity| granularity.name() == name)
            .ok_or_else(|| TimelineError::UnknownGranularity(name.to_owned()))
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::TwelveHours => "12 hours",
            Self::SixHours => "6 hours",
            Self::FourHours => "4 hours",
            Self::TwoHours => "2 hours",
            Self::Hour => "hour",
            Self::ThirtyMinutes => "30 minutes",
            Self::FifteenMinutes => "15 minutes",
            Self::TenMinutes => "10 minutes",
            Self::FiveMinutes => "5 minutes",
            Self::Minute => "minute",
            Self::ThirtySeconds => "30 seconds",
            Self::FifteenSeconds => "15 seconds",
            Self::TenSeconds => "10 seconds",
            Self::FiveSeconds => "5 seconds",
            Self::Second => "second",
        }
    }

    /// How many ticks of this granularity fit in one day.
    #[must_use]
    pub const fn day_subdivision_factor(self) -> i64 {
        match self {
            Self::Day => 1,
            Self::TwelveHours => 2,
            Self::SixHours => 4,
            Self::FourHours => 6,
            Self::TwoHours => 12,
            Self::Hour => 24,
            Self::ThirtyMinutes => 48,
            Self::FifteenMinutes => 96,
            Self::TenMinutes => 144,
            Self::FiveMinutes => 288,
            Self::Minute => 1_440,
            Self::ThirtySeconds => 2_880,
            Self::FifteenSeconds => 5_760,
            Self::TenSeconds => 8_640,
            Self::FiveSeconds => 17_280,
            Self::Second => SECONDS_PER_DAY,
        }
    }

    /// Exact duration of one tick interval in seconds.
    #[must_use]
    pub const fn seconds_per_unit(self) -> i64 {
        SECONDS_PER_DAY / self.day_subdivision_factor()
    }

    /// Calendar unit the granularity is a multiple of ("15 minutes" -> minute).
    #[must_use]
    pub const fn base_unit(self) -> CalendarUnit {
        match self {
            Self::Day => CalendarUnit::Day,
            Self::TwelveHours | Self::SixHours | Self::FourHours | Self::TwoHours | Self::Hour => {
                CalendarUnit::Hour
            }
            Self::ThirtyMinutes
            | Self::FifteenMinutes
            | Self::TenMinutes
            | Self::FiveMinutes
            | Self::Minute => CalendarUnit::Minute,
            Self::ThirtySeconds
            | Self::FifteenSeconds
            | Self::TenSeconds
            | Self::FiveSeconds
            | Self::Second => CalendarUnit::Second,
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> i64 {
        self.seconds_per_unit() / self.base_unit().seconds()
    }

    #[must_use]
    pub const fn is_day(self) -> bool {
        matches!(self, Self::Day)
    }

    #[must_use]
    pub const fn shows_seconds(self) -> bool {
        matches!(self.base_unit(), CalendarUnit::Second)
    }

    #[must_use]
    pub const fn tick_size(self) -> TickSize {
        match self {
            Self::Day => TickSize::new(5.0, 48.0),
            Self::TwelveHours | Self::SixHours => TickSize::new(4.5, 25.0),
            Self::FourHours | Self::TwoHours | Self::Hour => TickSize::new(4.0, 20.0),
            Self::ThirtyMinutes | Self::FifteenMinutes => TickSize::new(3.0, 12.0),
            Self::TenMinutes | Self::FiveMinutes | Self::Minute => TickSize::new(2.0, 8.0),
            Self::ThirtySeconds | Self::FifteenSeconds => TickSize::new(1.5, 7.0),
            Self::TenSeconds | Self::FiveSeconds | Self::Second => TickSize::new(1.0, 4.0),
        }
    }

    /// Minimum distance between neighbouring ticks for them to be drawn at all.
    #[must_use]
    pub const fn min_space_px(self) -> f64 {
        match self.base_unit() {
            CalendarUnit::Second => 6.0,
            _ => 8.0,
        }
    }

    /// Minimum distance between neighbouring ticks for them to carry labels.
    #[must_use]
    pub const fn min_label_space_px(self) -> f64 {
        match self.base_unit() {
            CalendarUnit::Day => 60.0,
            CalendarUnit::Hour | CalendarUnit::Minute => 36.0,
            CalendarUnit::Second => 44.0,
        }
    }

    /// On-screen distance between two neighbouring ticks at `scale` px per day.
    #[must_use]
    pub fn spacing_px(self, scale: f64) -> f64 {
        scale / self.day_subdivision_factor() as f64
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Granularity {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl Serialize for Granularity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Self::from_name(&name).map_err(serde::de::Error::custom)
    }
}
