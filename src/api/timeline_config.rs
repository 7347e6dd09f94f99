use serde::{Deserialize, Serialize};

use crate::core::{Granularity, TimeAxisTimeZone, TimeTick};
use crate::error::{TimelineError, TimelineResult};

use super::axis_geometry::AxisGeometry;
use super::label_placer::TimeLabellerConfig;

/// Static configuration of one timeline axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub geometry: AxisGeometry,
    pub ticks: Vec<TimeTick>,
    pub timezone: TimeAxisTimeZone,
    pub labeller: TimeLabellerConfig,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            geometry: AxisGeometry::default(),
            ticks: TimeTick::selected(),
            timezone: TimeAxisTimeZone::Utc,
            labeller: TimeLabellerConfig::default(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn new(geometry: AxisGeometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: Vec<TimeTick>) -> Self {
        self.ticks = ticks;
        self
    }

    /// Replaces the tick set with one default tick per granularity name.
    pub fn with_tick_names<'a>(
        mut self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> TimelineResult<Self> {
        self.ticks = names
            .into_iter()
            .map(|name| Granularity::from_name(name).map(TimeTick::new))
            .collect::<TimelineResult<Vec<_>>>()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: TimeAxisTimeZone) -> Self {
        self.timezone = timezone;
        self
    }

    #[must_use]
    pub fn with_labeller(mut self, labeller: TimeLabellerConfig) -> Self {
        self.labeller = labeller;
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        self.geometry.validate()?;
        validate_labeller(&self.labeller)?;
        for tick in &self.ticks {
            validate_tick(tick)?;
        }
        Ok(())
    }
}

pub(super) fn validate_labeller(labeller: &TimeLabellerConfig) -> TimelineResult<()> {
    for (field, value) in [
        ("date_font_size_px", labeller.date_font_size_px),
        ("time_font_size_px", labeller.time_font_size_px),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "labeller `{field}` must be finite and > 0"
            )));
        }
    }
    for (field, value) in [
        ("date_dist_from_edge", labeller.date_dist_from_edge),
        ("time_dist_from_edge", labeller.time_dist_from_edge),
    ] {
        if !value.is_finite() {
            return Err(TimelineError::InvalidData(format!(
                "labeller `{field}` must be finite"
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_tick(tick: &TimeTick) -> TimelineResult<()> {
    let size = tick.resolved_tick_size();
    if !size.thickness.is_finite()
        || !size.length.is_finite()
        || size.thickness <= 0.0
        || size.length < 0.0
    {
        return Err(TimelineError::InvalidData(format!(
            "tick size of `{}` must be finite with thickness > 0",
            tick.granularity
        )));
    }
    for value in [tick.resolved_min_space(), tick.resolved_min_label_space()] {
        if !value.is_finite() || value < 0.0 {
            return Err(TimelineError::InvalidData(format!(
                "tick spacing thresholds of `{}` must be finite and >= 0",
                tick.granularity
            )));
        }
    }
    Ok(())
}
