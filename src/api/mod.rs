mod axis_geometry;
mod engine;
mod json_contract;
mod label_measure;
mod label_placer;
mod timeline_config;

pub use axis_geometry::AxisGeometry;
pub use engine::Timeline;
pub use json_contract::{TIMELINE_CONFIG_JSON_SCHEMA_V1, TimelineConfigJsonContractV1};
pub use label_measure::{EstimatedLabelMeasurer, LabelMeasurer, LabelSize};
pub use label_placer::{
    LabelCandidate, LabelLayout, LabelPlacer, TimeLabellerConfig, label_anchor,
    stack_trailing_dates,
};
pub use timeline_config::TimelineConfig;
