use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::{Granularity, Orientation};
use crate::error::TimelineResult;
use crate::render::{LabelKind, ScreenRect, TextHAlign};

/// Identity of a tick across redraws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TickKey {
    /// Position of the tick family in the configured tick list.
    pub slot: usize,
    pub granularity: Granularity,
    /// Whole seconds since the epoch of the tick instant.
    pub epoch_seconds: i64,
}

/// One tick mark to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMark {
    pub key: TickKey,
    pub time: DateTime<FixedOffset>,
    pub tick_index: f64,
    pub rect: ScreenRect,
}

/// One text label to draw; `rect.x`/`rect.y` is the anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub key: TickKey,
    pub kind: LabelKind,
    pub text: String,
    pub rect: ScreenRect,
    pub font_size_px: f64,
    pub h_align: TextHAlign,
}

/// How this pass's labels relate to the previous pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabelDiff {
    /// Labels new in this pass.
    pub created: Vec<TickKey>,
    /// Labels kept from the previous pass, possibly at a new position.
    pub moved: Vec<TickKey>,
    /// Labels of the previous pass that are gone.
    pub released: Vec<TickKey>,
}

impl LabelDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.moved.is_empty() && self.released.is_empty()
    }
}

/// Everything the host needs to draw the axis for one visible window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub orientation: Orientation,
    pub ticks: Vec<TickMark>,
    pub labels: Vec<AxisLabel>,
    pub diff: LabelDiff,
}

impl TimelineFrame {
    #[must_use]
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            ticks: Vec::new(),
            labels: Vec::new(),
            diff: LabelDiff::default(),
        }
    }

    pub fn validate(&self) -> TimelineResult<()> {
        for tick in &self.ticks {
            tick.rect.validate()?;
        }
        for label in &self.labels {
            label.rect.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty() && self.labels.is_empty()
    }

    /// Labels of one granularity, in frame order.
    pub fn labels_for(&self, granularity: Granularity) -> impl Iterator<Item = &AxisLabel> {
        self.labels
            .iter()
            .filter(move |label| label.key.granularity == granularity)
    }

    /// Ticks of one granularity, in frame order.
    pub fn ticks_for(&self, granularity: Granularity) -> impl Iterator<Item = &TickMark> {
        self.ticks
            .iter()
            .filter(move |tick| tick.key.granularity == granularity)
    }
}
