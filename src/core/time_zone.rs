use std::fmt::Debug;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};

/// Timezone capability consumed by the time axis.
///
/// The engine never reads the system timezone database itself; hosts pass an
/// implementation in. Any `chrono::TimeZone` qualifies, which covers `Utc`,
/// `FixedOffset` and `chrono_tz::Tz`.
pub trait AxisTimeZone: Debug {
    /// UTC offset in effect at `instant`.
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset;

    /// Resolves a local wall-clock time to an instant.
    ///
    /// Ambiguous local times resolve to the earlier instant; local times that
    /// fall into a gap return `None`.
    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Utc>>;

    /// Expresses `instant` in this timezone's offset.
    fn to_local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(instant))
    }
}

impl<T> AxisTimeZone for T
where
    T: TimeZone + Debug,
{
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        self.offset_from_utc_datetime(&instant.naive_utc()).fix()
    }

    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        self.from_local_datetime(&local)
            .earliest()
            .map(|resolved| resolved.with_timezone(&Utc))
    }
}

/// Serializable timezone selector for timeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TimeAxisTimeZone {
    #[default]
    Utc,
    FixedOffsetMinutes {
        minutes: i16,
    },
    /// IANA zone name such as `"Europe/Madrid"`.
    Named(String),
}

impl TimeAxisTimeZone {
    /// Resolves the selector to a timezone capability.
    pub fn resolve(&self) -> TimelineResult<ResolvedTimeZone> {
        match self {
            Self::Utc => Ok(ResolvedTimeZone::Utc),
            Self::FixedOffsetMinutes { minutes } => {
                let seconds = i32::from(*minutes) * 60;
                FixedOffset::east_opt(seconds)
                    .map(ResolvedTimeZone::Fixed)
                    .ok_or_else(|| {
                        TimelineError::InvalidData(format!(
                            "utc offset of {minutes} minutes is out of range"
                        ))
                    })
            }
            Self::Named(name) => name
                .parse::<Tz>()
                .map(ResolvedTimeZone::Named)
                .map_err(|_| TimelineError::UnknownTimeZone(name.clone())),
        }
    }
}

/// Concrete timezone behind a [`TimeAxisTimeZone`] selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedTimeZone {
    Utc,
    Fixed(FixedOffset),
    Named(Tz),
}

impl AxisTimeZone for ResolvedTimeZone {
    fn offset_at(&self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Utc => Utc.offset_at(instant),
            Self::Fixed(offset) => offset.offset_at(instant),
            Self::Named(tz) => tz.offset_at(instant),
        }
    }

    fn localize(&self, local: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Utc => Utc.localize(local),
            Self::Fixed(offset) => offset.localize(local),
            Self::Named(tz) => tz.localize(local),
        }
    }
}
