use serde::{Deserialize, Serialize};

use crate::core::Orientation;
use crate::error::{TimelineError, TimelineResult};

/// Axis-aligned box in screen space; `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center_x(self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn center_y(self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Start coordinate along the axis direction.
    #[must_use]
    pub fn axis_start(self, orientation: Orientation) -> f64 {
        if orientation.is_vertical() { self.y } else { self.x }
    }

    /// Extent along the axis direction.
    #[must_use]
    pub fn axis_extent(self, orientation: Orientation) -> f64 {
        if orientation.is_vertical() {
            self.height
        } else {
            self.width
        }
    }

    /// Same box moved so it starts at `start` along the axis direction.
    #[must_use]
    pub fn with_axis_start(mut self, orientation: Orientation, start: f64) -> Self {
        if orientation.is_vertical() {
            self.y = start;
        } else {
            self.x = start;
        }
        self
    }

    pub fn validate(self) -> TimelineResult<()> {
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(TimelineError::InvalidData(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(TimelineError::InvalidData(
                "rect size must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Horizontal alignment of the lines inside a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextHAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
    /// Clock time of a sub-day tick.
    Time,
    /// Calendar date of a day tick.
    Date,
}
