use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::core::granularity::{Granularity, TickSize};
use crate::core::time_mapping::{local_index_of, timestamp_of};
use crate::core::time_zone::AxisTimeZone;
use crate::error::TimelineResult;

/// Placement of ticks and labels across a vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TickHAlign {
    #[default]
    Left,
    Right,
    LineLeft,
    LineRight,
}

/// Placement of ticks and labels across a horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TickVAlign {
    Top,
    #[default]
    Bottom,
    LineTop,
    LineBottom,
}

/// One configured tick family on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeTick {
    pub granularity: Granularity,
    pub halign: TickHAlign,
    pub valign: TickVAlign,
    pub tick_size: Option<TickSize>,
    pub min_space_px: Option<f64>,
    pub min_label_space_px: Option<f64>,
    pub labelled: bool,
}

impl Default for TimeTick {
    fn default() -> Self {
        Self::new(Granularity::Day)
    }
}

impl TimeTick {
    #[must_use]
    pub const fn new(granularity: Granularity) -> Self {
        Self {
            granularity,
            halign: TickHAlign::Left,
            valign: TickVAlign::Bottom,
            tick_size: None,
            min_space_px: None,
            min_label_space_px: None,
            labelled: true,
        }
    }

    /// One tick per available granularity, coarsest first.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Granularity::ALL.into_iter().map(Self::new).collect()
    }

    /// The default tick set, see [`Granularity::SELECTED`].
    #[must_use]
    pub fn selected() -> Vec<Self> {
        Granularity::SELECTED.into_iter().map(Self::new).collect()
    }

    #[must_use]
    pub fn with_halign(mut self, halign: TickHAlign) -> Self {
        self.halign = halign;
        self
    }

    #[must_use]
    pub fn with_valign(mut self, valign: TickVAlign) -> Self {
        self.valign = valign;
        self
    }

    #[must_use]
    pub fn with_tick_size(mut self, tick_size: TickSize) -> Self {
        self.tick_size = Some(tick_size);
        self
    }

    #[must_use]
    pub fn with_min_space(mut self, min_space_px: f64) -> Self {
        self.min_space_px = Some(min_space_px);
        self
    }

    #[must_use]
    pub fn with_min_label_space(mut self, min_label_space_px: f64) -> Self {
        self.min_label_space_px = Some(min_label_space_px);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labelled: bool) -> Self {
        self.labelled = labelled;
        self
    }

    #[must_use]
    pub fn resolved_tick_size(&self) -> TickSize {
        self.tick_size.unwrap_or(self.granularity.tick_size())
    }

    #[must_use]
    pub fn resolved_min_space(&self) -> f64 {
        self.min_space_px.unwrap_or(self.granularity.min_space_px())
    }

    #[must_use]
    pub fn resolved_min_label_space(&self) -> f64 {
        self.min_label_space_px
            .unwrap_or(self.granularity.min_label_space_px())
    }

    /// Distance between neighbouring ticks at `scale` px per day.
    #[must_use]
    pub fn spacing_px(&self, scale: f64) -> f64 {
        self.granularity.spacing_px(scale)
    }

    /// Whether the ticks are far enough apart to be drawn at `scale`.
    #[must_use]
    pub fn is_drawable(&self, scale: f64) -> bool {
        self.spacing_px(scale) >= self.resolved_min_space()
    }

    pub fn datetime_of(
        &self,
        tick_index: f64,
        tz: &impl AxisTimeZone,
    ) -> TimelineResult<DateTime<FixedOffset>> {
        timestamp_of(tick_index, self.granularity, tz)
    }

    #[must_use]
    pub fn index_of(&self, time: &DateTime<FixedOffset>) -> f64 {
        local_index_of(time, self.granularity)
    }

    /// Label text for the tick at `time`, or `None` when this tick family
    /// carries no labels.
    ///
    /// Day ticks mark the end of a day and name that day. `succinct` drops
    /// the seconds field from time labels.
    #[must_use]
    pub fn label_text(&self, time: &DateTime<FixedOffset>, succinct: bool) -> Option<String> {
        if !self.labelled {
            return None;
        }
        match self.granularity {
            Granularity::Second => None,
            Granularity::Day => {
                let day = time.checked_sub_signed(TimeDelta::seconds(1))?;
                Some(day.format("%a\n%m-%d-%y").to_string())
            }
            granularity if succinct && !granularity.shows_seconds() => {
                Some(time.format("%H:%M").to_string())
            }
            _ => Some(time.format("%H:%M:%S").to_string()),
        }
    }
}
