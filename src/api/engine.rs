use chrono::{DateTime, FixedOffset, TimeDelta};
use tracing::debug;

use crate::core::{
    Granularity, ResolvedTimeZone, SECONDS_PER_DAY, TickIter, TimeAxisTimeZone, TimeTick,
    VisibleWindow, global_index_of, global_index_of_time, time_of_global_index, to_epoch_seconds,
};
use crate::error::TimelineResult;
use crate::render::{Renderer, TickKey, TickMark, TimelineFrame};

use super::axis_geometry::AxisGeometry;
use super::label_measure::{EstimatedLabelMeasurer, LabelMeasurer};
use super::label_placer::{LabelCandidate, LabelLayout, LabelPlacer, TimeLabellerConfig};
use super::timeline_config::{TimelineConfig, validate_labeller, validate_tick};

/// Main facade consumed by host widgets.
///
/// One `Timeline` serves one axis: it owns the configured tick families,
/// the timezone, the axis geometry and the label state carried between
/// redraws. Call [`Timeline::recompute`] (or [`Timeline::render`]) whenever
/// the visible window or scale changes.
pub struct Timeline<R: Renderer> {
    renderer: R,
    config: TimelineConfig,
    timezone: ResolvedTimeZone,
    placer: LabelPlacer,
    measurer: Box<dyn LabelMeasurer + Send>,
}

impl<R: Renderer> Timeline<R> {
    pub fn new(renderer: R, config: TimelineConfig) -> TimelineResult<Self> {
        config.validate()?;
        let timezone = config.timezone.resolve()?;
        Ok(Self {
            renderer,
            config,
            timezone,
            placer: LabelPlacer::new(),
            measurer: Box::new(EstimatedLabelMeasurer),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn timezone(&self) -> ResolvedTimeZone {
        self.timezone
    }

    #[must_use]
    pub fn ticks(&self) -> &[TimeTick] {
        &self.config.ticks
    }

    #[must_use]
    pub fn geometry(&self) -> AxisGeometry {
        self.config.geometry
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Switches the timezone; cached label texts are dropped.
    pub fn set_timezone(&mut self, timezone: TimeAxisTimeZone) -> TimelineResult<()> {
        self.timezone = timezone.resolve()?;
        self.config.timezone = timezone;
        self.reinit();
        Ok(())
    }

    /// Replaces the configured tick families; cached labels are dropped.
    pub fn set_ticks(&mut self, ticks: Vec<TimeTick>) -> TimelineResult<()> {
        for tick in &ticks {
            validate_tick(tick)?;
        }
        self.config.ticks = ticks;
        self.reinit();
        Ok(())
    }

    pub fn set_geometry(&mut self, geometry: AxisGeometry) -> TimelineResult<()> {
        self.config.geometry = geometry.validate()?;
        Ok(())
    }

    pub fn set_labeller_config(&mut self, labeller: TimeLabellerConfig) -> TimelineResult<()> {
        validate_labeller(&labeller)?;
        self.config.labeller = labeller;
        self.reinit();
        Ok(())
    }

    /// Installs the host's text measurement.
    pub fn set_label_measurer(&mut self, measurer: impl LabelMeasurer + Send + 'static) {
        self.measurer = Box::new(measurer);
        self.reinit();
    }

    /// Forgets the labels of the previous pass; the next pass creates all
    /// labels afresh.
    pub fn reinit(&mut self) {
        self.placer.reinit();
    }

    /// Finest configured tick family that is drawable at `scale`.
    #[must_use]
    pub fn densest_tick(&self, scale: f64) -> Option<TimeTick> {
        self.config
            .ticks
            .iter()
            .filter(|tick| tick.is_drawable(scale))
            .max_by_key(|tick| tick.granularity.day_subdivision_factor())
            .copied()
    }

    /// Ticks and labels for `window`.
    pub fn recompute(&mut self, window: &VisibleWindow) -> TimelineResult<TimelineFrame> {
        let geometry = self.config.geometry;
        let orientation = window.orientation;
        let densest = self.densest_tick(window.scale).map(|tick| tick.granularity);
        let mut frame = TimelineFrame::new(orientation);

        self.placer.begin_pass();
        for (slot, tick) in self.config.ticks.iter().enumerate() {
            let granularity = tick.granularity;
            for time in TickIter::new(tick, window, densest, &self.timezone) {
                let tick_index = tick.index_of(&time);
                let pos = geometry.index_to_pos(global_index_of(tick_index, granularity), window);
                let rect = geometry.tick_rect(tick, pos, orientation);
                let key = TickKey {
                    slot,
                    granularity,
                    epoch_seconds: to_epoch_seconds(tick_index, granularity),
                };

                let candidate = LabelCandidate {
                    slot,
                    key,
                    time,
                    tick_index,
                    rect,
                };
                self.placer.register(tick, candidate, window.scale);
                frame.ticks.push(TickMark {
                    key,
                    time,
                    tick_index,
                    rect,
                });
            }
        }

        let layout = LabelLayout {
            geometry,
            orientation,
            backward: window.backward,
            config: &self.config.labeller,
        };
        let (labels, diff) = self.placer.finalize(layout, self.measurer.as_ref());
        frame.labels = labels;
        frame.diff = diff;

        debug!(
            ticks = frame.ticks.len(),
            labels = frame.labels.len(),
            created = frame.diff.created.len(),
            released = frame.diff.released.len(),
            densest = densest.map(Granularity::name),
            "timeline recomputed"
        );
        Ok(frame)
    }

    /// Recomputes the frame for `window` and hands it to the renderer.
    pub fn render(&mut self, window: &VisibleWindow) -> TimelineResult<TimelineFrame> {
        let frame = self.recompute(window)?;
        self.renderer.render(&frame)?;
        Ok(frame)
    }

    /// Time at the start edge of the axis.
    pub fn time_0(&self, window: &VisibleWindow) -> TimelineResult<DateTime<FixedOffset>> {
        time_of_global_index(window.index_0, &self.timezone)
    }

    /// Time at the end edge of the axis.
    pub fn time_1(&self, window: &VisibleWindow) -> TimelineResult<DateTime<FixedOffset>> {
        time_of_global_index(window.index_1, &self.timezone)
    }

    /// Screen coordinate along the axis of `time`.
    #[must_use]
    pub fn pos_of_time(&self, time: &DateTime<FixedOffset>, window: &VisibleWindow) -> f64 {
        self.config
            .geometry
            .index_to_pos(global_index_of_time(time), window)
    }

    /// Time at screen coordinate `pos` along the axis.
    pub fn pos_to_time(
        &self,
        pos: f64,
        window: &VisibleWindow,
    ) -> TimelineResult<DateTime<FixedOffset>> {
        let index = self.config.geometry.pos_to_index(pos, window);
        time_of_global_index(index, &self.timezone)
    }

    /// Screen length covered by `delta` at the window's scale.
    #[must_use]
    pub fn timedelta_to_dist(&self, delta: TimeDelta, window: &VisibleWindow) -> f64 {
        let seconds = delta.num_milliseconds() as f64 / 1_000.0;
        seconds / SECONDS_PER_DAY as f64 * window.scale
    }
}
