use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::core::time_mapping::global_index_of_time;
use crate::error::{TimelineError, TimelineResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Visible portion of the axis, supplied by the host on every redraw.
///
/// `index_0` sits on the start edge of the axis (bottom when vertical, left
/// when horizontal) and `index_1` on the end edge. With `backward` set the
/// index decreases from the start edge toward the end edge, so
/// `index_0 > index_1`. `scale` is the screen length of one axis unit (one
/// day) in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleWindow {
    pub index_0: f64,
    pub index_1: f64,
    pub scale: f64,
    pub orientation: Orientation,
    pub backward: bool,
}

impl VisibleWindow {
    #[must_use]
    pub fn new(index_0: f64, index_1: f64, scale: f64) -> Self {
        Self {
            index_0,
            index_1,
            scale,
            orientation: Orientation::Vertical,
            backward: false,
        }
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_backward(mut self, backward: bool) -> Self {
        self.backward = backward;
        self
    }

    /// Window showing `start..end` across `axis_length_px` pixels.
    pub fn centered_on_timeframe(
        start: &DateTime<FixedOffset>,
        end: &DateTime<FixedOffset>,
        axis_length_px: f64,
        orientation: Orientation,
        backward: bool,
    ) -> TimelineResult<Self> {
        if !axis_length_px.is_finite() || axis_length_px <= 0.0 {
            return Err(TimelineError::InvalidData(
                "axis length must be finite and > 0".to_owned(),
            ));
        }
        let (first, last) = if start <= end { (start, end) } else { (end, start) };
        let first_index = global_index_of_time(first);
        let last_index = global_index_of_time(last);
        let span = last_index - first_index;
        if span <= 0.0 {
            return Err(TimelineError::InvalidData(
                "timeframe must span a positive duration".to_owned(),
            ));
        }

        let (index_0, index_1) = if backward {
            (last_index, first_index)
        } else {
            (first_index, last_index)
        };
        Ok(Self {
            index_0,
            index_1,
            scale: axis_length_px / span,
            orientation,
            backward,
        })
    }

    /// Smallest and largest visible axis index.
    #[must_use]
    pub fn index_min_max(&self) -> (f64, f64) {
        if self.backward {
            (self.index_1, self.index_0)
        } else {
            (self.index_0, self.index_1)
        }
    }

    /// Whether the window can produce any ticks at all.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let (min, max) = self.index_min_max();
        !self.index_0.is_finite()
            || !self.index_1.is_finite()
            || !self.scale.is_finite()
            || self.scale <= 0.0
            || min >= max
    }
}
