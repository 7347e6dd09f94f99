//! Label selection and layout for one time axis.
//!
//! Every redraw registers the visible ticks, then `finalize` decides which
//! of them carry a label and where it goes. Labels are keyed by
//! [`TickKey`]; the keys of the previous pass are kept so the host can move
//! existing text resources instead of recreating them.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Orientation, TickHAlign, TickVAlign, TimeTick};
use crate::render::{AxisLabel, LabelDiff, LabelKind, ScreenRect, TextHAlign, TickKey};

use super::axis_geometry::AxisGeometry;
use super::label_measure::{LabelMeasurer, LabelSize};

/// Fonts and distances used for date and time labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeLabellerConfig {
    pub date_font_size_px: f64,
    pub time_font_size_px: f64,
    /// Distance of date labels from the axis edge they are aligned to.
    pub date_dist_from_edge: f64,
    /// Distance of time labels from the axis edge they are aligned to.
    pub time_dist_from_edge: f64,
}

impl Default for TimeLabellerConfig {
    fn default() -> Self {
        Self {
            date_font_size_px: 12.0,
            time_font_size_px: 7.0,
            date_dist_from_edge: 55.0,
            time_dist_from_edge: 22.0,
        }
    }
}

impl TimeLabellerConfig {
    #[must_use]
    pub fn font_size(&self, kind: LabelKind) -> f64 {
        match kind {
            LabelKind::Date => self.date_font_size_px,
            LabelKind::Time => self.time_font_size_px,
        }
    }

    #[must_use]
    pub fn dist_from_edge(&self, kind: LabelKind) -> f64 {
        match kind {
            LabelKind::Date => self.date_dist_from_edge,
            LabelKind::Time => self.time_dist_from_edge,
        }
    }
}

/// Axis layout inputs shared by every label of one pass.
#[derive(Debug, Clone, Copy)]
pub struct LabelLayout<'a> {
    pub geometry: AxisGeometry,
    pub orientation: Orientation,
    pub backward: bool,
    pub config: &'a TimeLabellerConfig,
}

/// One visible tick offered to [`LabelPlacer::register`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelCandidate {
    /// Position of the tick family in the configured tick list.
    pub slot: usize,
    pub key: TickKey,
    pub time: DateTime<FixedOffset>,
    pub tick_index: f64,
    /// Box of the tick mark the label is placed against.
    pub rect: ScreenRect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SecondClaim {
    spacing_px: f64,
    slot: usize,
}

#[derive(Debug, Clone, PartialEq)]
struct CachedLabel {
    text: String,
    size: LabelSize,
}

/// Inputs shared by every label placed in one `finalize` call.
#[derive(Clone, Copy)]
struct PlacementPass<'a> {
    succinct: bool,
    layout: LabelLayout<'a>,
    measurer: &'a dyn LabelMeasurer,
}

#[derive(Debug, Default)]
pub struct LabelPlacer {
    registry: IndexMap<usize, (TimeTick, BTreeMap<i64, LabelCandidate>)>,
    claims: HashMap<i64, SecondClaim>,
    have_time_label: bool,
    previous: HashMap<TickKey, CachedLabel>,
}

impl LabelPlacer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the registrations of the previous pass; placed labels are kept
    /// for the next diff.
    pub fn begin_pass(&mut self) {
        self.registry.clear();
        self.claims.clear();
        self.have_time_label = false;
    }

    /// Drops all state, including the labels of the previous pass.
    pub fn reinit(&mut self) {
        self.begin_pass();
        self.previous.clear();
    }

    #[must_use]
    pub fn have_time_label(&self) -> bool {
        self.have_time_label
    }

    #[must_use]
    pub fn registered_count(&self) -> usize {
        self.registry.values().map(|(_, entries)| entries.len()).sum()
    }

    /// Offers one visible tick for labelling.
    ///
    /// Returns `false` when the tick is dropped: its family is too dense to
    /// label at `scale`, or another family with at least the same spacing
    /// already claimed the same instant. A later, sparser family evicts the
    /// earlier claimant.
    pub fn register(&mut self, tick: &TimeTick, candidate: LabelCandidate, scale: f64) -> bool {
        if !tick.labelled {
            return false;
        }
        let spacing_px = tick.spacing_px(scale);
        if spacing_px < tick.resolved_min_label_space() {
            return false;
        }

        let seconds = candidate.key.epoch_seconds;
        if let Some(claim) = self.claims.get(&seconds).copied() {
            if claim.spacing_px >= spacing_px {
                trace!(
                    granularity = %tick.granularity,
                    seconds,
                    "label superseded by a sparser tick at the same instant"
                );
                return false;
            }
            if let Some((_, entries)) = self.registry.get_mut(&claim.slot) {
                entries.remove(&seconds);
            }
        }

        let slot = candidate.slot;
        self.registry
            .entry(slot)
            .or_insert_with(|| (*tick, BTreeMap::new()))
            .1
            .insert(seconds, candidate);
        self.claims.insert(seconds, SecondClaim { spacing_px, slot });
        true
    }

    /// Places the labels of every registered tick and diffs them against the
    /// previous pass.
    pub fn finalize(
        &mut self,
        layout: LabelLayout<'_>,
        measurer: &dyn LabelMeasurer,
    ) -> (Vec<AxisLabel>, LabelDiff) {
        let succinct = !self
            .registry
            .values()
            .any(|(tick, _)| tick.granularity.shows_seconds());
        self.have_time_label = self.registry.values().any(|(tick, entries)| {
            !tick.granularity.is_day()
                && entries
                    .values()
                    .any(|entry| tick.label_text(&entry.time, succinct).is_some())
        });
        let pass = PlacementPass {
            succinct,
            layout,
            measurer,
        };
        let mut current: HashMap<TickKey, CachedLabel> = HashMap::new();
        let mut labels = Vec::new();

        for (tick, entries) in self.registry.values() {
            if !tick.granularity.is_day() {
                for entry in entries.values() {
                    if let Some(label) =
                        self.place(tick, entry, LabelKind::Time, &pass, &mut current)
                    {
                        labels.push(label);
                    }
                }
                continue;
            }

            let mut bottom_up: Vec<&LabelCandidate> = entries.values().collect();
            bottom_up.sort_by(|left, right| left.tick_index.total_cmp(&right.tick_index));
            if layout.backward {
                bottom_up.reverse();
            }

            if self.have_time_label {
                let mut placed: SmallVec<[AxisLabel; 8]> = SmallVec::new();
                for entry in bottom_up {
                    if let Some(label) =
                        self.place(tick, entry, LabelKind::Date, &pass, &mut current)
                    {
                        placed.push(label);
                    }
                }
                stack_trailing_dates(&mut placed, layout);
                labels.extend(placed);
            } else {
                let shown = bottom_up.len().saturating_sub(1);
                for entry in bottom_up.into_iter().take(shown) {
                    if let Some(label) =
                        self.place(tick, entry, LabelKind::Date, &pass, &mut current)
                    {
                        labels.push(label);
                    }
                }
            }
        }

        let diff = diff_keys(&self.previous, &current);
        self.previous = current;
        (labels, diff)
    }

    fn place(
        &self,
        tick: &TimeTick,
        entry: &LabelCandidate,
        kind: LabelKind,
        pass: &PlacementPass<'_>,
        current: &mut HashMap<TickKey, CachedLabel>,
    ) -> Option<AxisLabel> {
        let PlacementPass {
            succinct,
            layout,
            measurer,
        } = *pass;
        let text = tick.label_text(&entry.time, succinct)?;
        let font_size_px = layout.config.font_size(kind);
        let size = match self.previous.get(&entry.key) {
            Some(cached) if cached.text == text => cached.size,
            _ => measurer.measure(&text, font_size_px),
        };

        let (x, y) = label_anchor(tick, entry.rect, size, kind, layout);
        current.insert(
            entry.key,
            CachedLabel {
                text: text.clone(),
                size,
            },
        );
        Some(AxisLabel {
            key: entry.key,
            kind,
            text,
            rect: ScreenRect::new(x, y, size.width, size.height),
            font_size_px,
            h_align: if layout.orientation.is_vertical() {
                TextHAlign::Left
            } else {
                TextHAlign::Center
            },
        })
    }
}

/// Bottom-left anchor of a label of `size` next to the tick box `tick_rect`.
///
/// The label is centered on the tick along the axis and kept at least one
/// tick length plus padding away from the edge it is aligned to.
#[must_use]
pub fn label_anchor(
    tick: &TimeTick,
    tick_rect: ScreenRect,
    size: LabelSize,
    kind: LabelKind,
    layout: LabelLayout<'_>,
) -> (f64, f64) {
    let geometry = layout.geometry;
    let line_pos = geometry.line_pos(layout.orientation);
    let dist = layout
        .config
        .dist_from_edge(kind)
        .max(tick.resolved_tick_size().length + geometry.tick_label_padding);

    if layout.orientation.is_vertical() {
        let y = tick_rect.center_y() - size.height / 2.0;
        let x = match tick.halign {
            TickHAlign::Left => geometry.x + dist,
            TickHAlign::LineLeft => line_pos - dist - size.width,
            TickHAlign::LineRight => line_pos + dist,
            TickHAlign::Right => geometry.right() - dist - size.width,
        };
        (x, y)
    } else {
        let x = tick_rect.center_x() - size.width / 2.0;
        let y = match tick.valign {
            TickVAlign::Top => geometry.top() - dist - size.height,
            TickVAlign::LineTop => line_pos + dist,
            TickVAlign::LineBottom => line_pos - dist - size.height,
            TickVAlign::Bottom => geometry.y + dist,
        };
        (x, y)
    }
}

/// Keeps the last two date labels (in screen order) inside the axis end.
///
/// The last label sits flush against the end edge unless the label before it
/// pushes it further out; the label before it never runs past the end edge.
pub fn stack_trailing_dates(placed: &mut [AxisLabel], layout: LabelLayout<'_>) {
    let orientation = layout.orientation;
    let max_edge = layout.geometry.axis_end(orientation);

    match placed {
        [] => {}
        [only] => {
            let extent = only.rect.axis_extent(orientation);
            only.rect = only.rect.with_axis_start(orientation, max_edge - extent);
        }
        [.., second_last, last] => {
            let second_last_extent = second_last.rect.axis_extent(orientation);
            let second_last_end = second_last.rect.axis_start(orientation) + second_last_extent;
            let last_extent = last.rect.axis_extent(orientation);

            let last_start = second_last_end.max(max_edge - last_extent);
            let second_last_start = second_last_end.min(max_edge) - second_last_extent;
            last.rect = last.rect.with_axis_start(orientation, last_start);
            second_last.rect = second_last
                .rect
                .with_axis_start(orientation, second_last_start);
        }
    }
}

fn diff_keys(
    previous: &HashMap<TickKey, CachedLabel>,
    current: &HashMap<TickKey, CachedLabel>,
) -> LabelDiff {
    let previous_keys: HashSet<TickKey> = previous.keys().copied().collect();
    let current_keys: HashSet<TickKey> = current.keys().copied().collect();

    let mut diff = LabelDiff {
        created: current_keys.difference(&previous_keys).copied().collect(),
        moved: current_keys.intersection(&previous_keys).copied().collect(),
        released: previous_keys.difference(&current_keys).copied().collect(),
    };
    diff.created.sort_unstable();
    diff.moved.sort_unstable();
    diff.released.sort_unstable();
    diff
}
