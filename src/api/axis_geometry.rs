use serde::{Deserialize, Serialize};

use crate::core::{Orientation, TickHAlign, TickVAlign, TimeTick, VisibleWindow};
use crate::error::{TimelineError, TimelineResult};
use crate::render::ScreenRect;

/// Screen placement of the axis widget.
///
/// The axis direction runs bottom-to-top when vertical and left-to-right
/// when horizontal. `line_offset` places the optional axis line measured
/// from the left (vertical) or bottom (horizontal) edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub line_offset: f64,
    pub tick_label_padding: f64,
}

impl Default for AxisGeometry {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 200.0,
            height: 600.0,
            line_offset: 0.0,
            tick_label_padding: 5.0,
        }
    }
}

impl AxisGeometry {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_line_offset(mut self, line_offset: f64) -> Self {
        self.line_offset = line_offset;
        self
    }

    #[must_use]
    pub fn with_tick_label_padding(mut self, padding: f64) -> Self {
        self.tick_label_padding = padding;
        self
    }

    pub fn validate(self) -> TimelineResult<Self> {
        if !self.width.is_finite()
            || !self.height.is_finite()
            || self.width <= 0.0
            || self.height <= 0.0
        {
            return Err(TimelineError::InvalidGeometry {
                width: self.width,
                height: self.height,
            });
        }
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.line_offset.is_finite()
            || !self.tick_label_padding.is_finite()
        {
            return Err(TimelineError::InvalidData(
                "axis position, line offset and padding must be finite".to_owned(),
            ));
        }
        Ok(self)
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
    pub fn line_pos(self, orientation: Orientation) -> f64 {
        if orientation.is_vertical() {
            self.x + self.line_offset
        } else {
            self.y + self.line_offset
        }
    }

    /// Screen length of the axis direction.
    #[must_use]
    pub fn axis_length(self, orientation: Orientation) -> f64 {
        if orientation.is_vertical() {
            self.height
        } else {
            self.width
        }
    }

    #[must_use]
    pub fn axis_start(self, orientation: Orientation) -> f64 {
        if orientation.is_vertical() {
            self.y
        } else {
            self.x
        }
    }

    #[must_use]
    pub fn axis_end(self, orientation: Orientation) -> f64 {
        if orientation.is_vertical() {
            self.top()
        } else {
            self.right()
        }
    }

    /// Screen coordinate along the axis of global index `index`.
    #[must_use]
    pub fn index_to_pos(self, index: f64, window: &VisibleWindow) -> f64 {
        let direction = if window.backward { -1.0 } else { 1.0 };
        self.axis_start(window.orientation) + (index - window.index_0) * window.scale * direction
    }

    /// Global index at screen coordinate `pos` along the axis.
    #[must_use]
    pub fn pos_to_index(self, pos: f64, window: &VisibleWindow) -> f64 {
        let direction = if window.backward { -1.0 } else { 1.0 };
        window.index_0 + (pos - self.axis_start(window.orientation)) / window.scale * direction
    }

    /// Box of the tick symbol of `tick` centered on axis coordinate `pos`.
    #[must_use]
    pub fn tick_rect(self, tick: &TimeTick, pos: f64, orientation: Orientation) -> ScreenRect {
        let size = tick.resolved_tick_size();
        let line_pos = self.line_pos(orientation);
        if orientation.is_vertical() {
            let x = match tick.halign {
                TickHAlign::Left => self.x,
                TickHAlign::Right => self.right() - size.length,
                TickHAlign::LineLeft => line_pos - size.length,
                TickHAlign::LineRight => line_pos,
            };
            ScreenRect::new(x, pos - size.thickness / 2.0, size.length, size.thickness)
        } else {
            let y = match tick.valign {
                TickVAlign::Top => self.top() - size.length,
                TickVAlign::Bottom => self.y,
                TickVAlign::LineTop => line_pos,
                TickVAlign::LineBottom => line_pos - size.length,
            };
            ScreenRect::new(pos - size.thickness / 2.0, y, size.thickness, size.length)
        }
    }
}
