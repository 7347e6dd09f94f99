use serde::{Deserialize, Serialize};

/// Rendered size of a label, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Host capability that measures label text before it is placed.
pub trait LabelMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> LabelSize;
}

/// Backend-independent estimate used when the host has no text engine wired in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimatedLabelMeasurer;

impl EstimatedLabelMeasurer {
    const LINE_HEIGHT_RATIO: f64 = 1.25;
}

impl LabelMeasurer for EstimatedLabelMeasurer {
    fn measure(&self, text: &str, font_size_px: f64) -> LabelSize {
        let mut lines = 0usize;
        let mut widest: f64 = 0.0;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(estimate_line_width_px(line, font_size_px));
        }
        LabelSize::new(
            widest,
            lines.max(1) as f64 * font_size_px * Self::LINE_HEIGHT_RATIO,
        )
    }
}

fn estimate_line_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            ':' => 0.30,
            '-' => 0.42,
            ' ' => 0.33,
            _ => 0.58,
        }
    });
    (units * font_size_px).max(font_size_px)
}

impl<F> LabelMeasurer for F
where
    F: Fn(&str, f64) -> LabelSize,
{
    fn measure(&self, text: &str, font_size_px: f64) -> LabelSize {
        self(text, font_size_px)
    }
}
