mod frame;
mod null_renderer;
mod primitives;

pub use frame::{AxisLabel, LabelDiff, TickKey, TickMark, TimelineFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{LabelKind, ScreenRect, TextHAlign};

use crate::error::TimelineResult;

/// Contract implemented by the host's drawing layer.
///
/// Hosts receive a fully computed `TimelineFrame`; creating, moving and
/// releasing text resources follows `TimelineFrame::diff`.
pub trait Renderer {
    fn render(&mut self, frame: &TimelineFrame) -> TimelineResult<()>;
}
