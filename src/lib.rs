//! timeline-rs: time-axis tick and label engine.
//!
//! The crate decides, for a pannable and zoomable time axis, which tick
//! marks to draw at granularities from one second to one day, where they
//! land on screen, and which of them get labels. Drawing itself stays with
//! the host: it receives a [`render::TimelineFrame`] per redraw.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{Timeline, TimelineConfig};
pub use error::{TimelineError, TimelineResult};
