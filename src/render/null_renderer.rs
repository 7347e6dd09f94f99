use crate::error::TimelineResult;
use crate::render::{Renderer, TimelineFrame};

/// No-op renderer used by tests and headless hosts.
///
/// It still validates frame content so tests catch non-finite geometry.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_tick_count: usize,
    pub last_label_count: usize,
    pub last_released_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()> {
        frame.validate()?;
        self.last_tick_count = frame.ticks.len();
        self.last_label_count = frame.labels.len();
        self.last_released_count = frame.diff.released.len();
        Ok(())
    }
}
