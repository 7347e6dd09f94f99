use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use tracing::{trace, warn};

use crate::core::granularity::{Granularity, SECONDS_PER_DAY};
use crate::core::time_rounding::{RoundingMode, round_time};
use crate::core::time_tick::TimeTick;
use crate::core::time_zone::AxisTimeZone;
use crate::core::window::VisibleWindow;
use crate::error::{TimelineError, TimelineResult};

/// Hard ceiling on ticks yielded by one iterator.
pub const MAX_TICKS_PER_ITER: usize = 200_000;

/// Slack added to the expected tick count before an iteration is truncated.
const ITERATION_SLACK: usize = 4;

/// Window edge at `index`, snapped to a whole microsecond.
///
/// Day-count indices cannot represent most instants exactly; snapping keeps
/// an edge typed in as "12:03:00" from landing a few hundred nanoseconds
/// early and losing the tick on it.
fn window_edge_time(
    index: f64,
    tz: &impl AxisTimeZone,
) -> TimelineResult<DateTime<FixedOffset>> {
    let micros = (index * (SECONDS_PER_DAY as f64) * 1_000_000.0).round();
    if !micros.is_finite() || micros > i64::MAX as f64 || micros < i64::MIN as f64 {
        return Err(TimelineError::InvalidData(format!(
            "window index {index} is out of range"
        )));
    }
    DateTime::from_timestamp_micros(micros as i64)
        .map(|instant| tz.to_local(instant))
        .ok_or_else(|| TimelineError::InvalidData(format!("window index {index} is out of range")))
}

/// Earliest and latest visible timestamps of `window`, in `tz`.
///
/// With `extension` the pair is widened by one unit of that granularity on
/// each side.
pub fn time_min_max(
    window: &VisibleWindow,
    tz: &impl AxisTimeZone,
    extension: Option<Granularity>,
) -> TimelineResult<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let (index_min, index_max) = window.index_min_max();
    let mut time_min = window_edge_time(index_min, tz)?;
    let mut time_max = window_edge_time(index_max, tz)?;

    if let Some(granularity) = extension {
        let interval = TimeDelta::seconds(granularity.seconds_per_unit());
        if let (Some(min), Some(max)) = (
            time_min.checked_sub_signed(interval),
            time_max.checked_add_signed(interval),
        ) {
            time_min = min;
            time_max = max;
        }
    }
    Ok((time_min, time_max))
}

/// Granularity used to widen the window before iterating `tick`.
///
/// Day ticks widen by the densest drawable granularity so the next day
/// boundary is known early enough for date stacking.
#[must_use]
pub fn extension_granularity(tick: &TimeTick, densest: Option<Granularity>) -> Granularity {
    if tick.granularity.is_day() {
        densest.unwrap_or(Granularity::Day)
    } else {
        tick.granularity
    }
}

/// Lazy sequence of tick timestamps for one tick family in one window.
///
/// Every timestamp carries the UTC offset `tz` has at that instant. Sub-day
/// families step by their exact duration; day ticks are snapped back onto
/// local midnight after each step, so days spanning a DST change stay aligned.
///
/// Single pass; build a fresh iterator for every redraw.
#[derive(Debug, Clone)]
pub struct TickIter<'z, Z: AxisTimeZone> {
    tz: &'z Z,
    granularity: Granularity,
    leading: Option<DateTime<FixedOffset>>,
    cursor: Option<DateTime<FixedOffset>>,
    time_max: Option<DateTime<FixedOffset>>,
    delta: TimeDelta,
    remaining: usize,
    trailing: bool,
}

impl<'z, Z: AxisTimeZone> TickIter<'z, Z> {
    /// Iterator that yields nothing.
    #[must_use]
    pub fn empty(tz: &'z Z) -> Self {
        Self {
            tz,
            granularity: Granularity::Day,
            leading: None,
            cursor: None,
            time_max: None,
            delta: TimeDelta::zero(),
            remaining: 0,
            trailing: false,
        }
    }

    /// Ticks of `tick` visible in `window`.
    ///
    /// `densest` is the finest granularity currently drawable on the axis.
    /// Windows that are degenerate, too dense for `tick` or outside the
    /// representable time range yield nothing.
    pub fn new(
        tick: &TimeTick,
        window: &VisibleWindow,
        densest: Option<Granularity>,
        tz: &'z Z,
    ) -> Self {
        if window.is_degenerate() || !tick.is_drawable(window.scale) {
            return Self::empty(tz);
        }

        let extension = extension_granularity(tick, densest);
        match Self::bounded(tick.granularity, window, extension, tz) {
            Ok(iter) => iter,
            Err(err) => {
                warn!(
                    granularity = %tick.granularity,
                    error = %err,
                    "skipping tick iteration outside representable range"
                );
                Self::empty(tz)
            }
        }
    }

    fn bounded(
        granularity: Granularity,
        window: &VisibleWindow,
        extension: Granularity,
        tz: &'z Z,
    ) -> TimelineResult<Self> {
        let (time_min, time_max) = time_min_max(window, tz, Some(extension))?;
        let first = relocalize(tz, &round_time(&time_min, granularity, RoundingMode::Up)?);
        let unit_seconds = granularity.seconds_per_unit();
        let delta = TimeDelta::seconds(unit_seconds);

        let span_seconds = (time_max - first).num_seconds().max(0);
        let expected = usize::try_from(span_seconds / unit_seconds)
            .unwrap_or(usize::MAX)
            .saturating_add(ITERATION_SLACK);
        if expected > MAX_TICKS_PER_ITER {
            warn!(
                granularity = %granularity,
                expected,
                limit = MAX_TICKS_PER_ITER,
                "tick iteration will be truncated"
            );
        }
        trace!(granularity = %granularity, %first, %time_max, "tick iteration bounds");

        let mut iter = Self {
            tz,
            granularity,
            leading: None,
            cursor: Some(first),
            time_max: Some(time_max),
            delta,
            remaining: expected.min(MAX_TICKS_PER_ITER),
            trailing: granularity.is_day() && !window.backward,
        };
        if granularity.is_day() && window.backward {
            iter.leading = iter.step(&first, -delta);
        }
        Ok(iter)
    }

    /// `time` moved by `delta`, in the offset `tz` has at the new instant.
    fn step(
        &self,
        time: &DateTime<FixedOffset>,
        delta: TimeDelta,
    ) -> Option<DateTime<FixedOffset>> {
        let stepped = relocalize(self.tz, &time.checked_add_signed(delta)?);
        if !self.granularity.is_day() {
            return Some(stepped);
        }
        // DST days are 23 or 25 hours long; the nearest midnight is the right one.
        match round_time(&stepped, Granularity::Day, RoundingMode::Nearest) {
            Ok(midnight) => Some(relocalize(self.tz, &midnight)),
            Err(err) => {
                warn!(%stepped, error = %err, "day tick left the representable range");
                None
            }
        }
    }
}

fn relocalize(tz: &impl AxisTimeZone, time: &DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    tz.to_local(time.with_timezone(&Utc))
}

impl<Z: AxisTimeZone> Iterator for TickIter<'_, Z> {
    type Item = DateTime<FixedOffset>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(leading) = self.leading.take() {
            return Some(leading);
        }

        let cursor = self.cursor?;
        let time_max = self.time_max?;
        if cursor <= time_max {
            if self.remaining == 0 {
                warn!(%cursor, %time_max, "tick iteration truncated");
                self.cursor = None;
                return None;
            }
            self.remaining -= 1;
            self.cursor = self.step(&cursor, self.delta);
            return Some(cursor);
        }

        self.cursor = None;
        if self.trailing {
            self.trailing = false;
            return Some(cursor);
        }
        None
    }
}
