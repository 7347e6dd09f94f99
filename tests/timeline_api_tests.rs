use approx::assert_relative_eq;
use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Timelike, Utc};
use timeline_rs::api::{AxisGeometry, LabelSize, TimeLabellerConfig};
use timeline_rs::core::{Granularity, Orientation, TimeAxisTimeZone, TimeTick, VisibleWindow};
use timeline_rs::render::NullRenderer;
use timeline_rs::{Timeline, TimelineConfig, TimelineError};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid utc time")
        .fixed_offset()
}

fn window(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    backward: bool,
) -> VisibleWindow {
    VisibleWindow::centered_on_timeframe(&start, &end, 600.0, Orientation::Vertical, backward)
        .expect("valid timeframe")
}

fn default_timeline() -> Timeline<NullRenderer> {
    Timeline::new(NullRenderer::default(), TimelineConfig::default()).expect("valid config")
}

fn assert_close_in_time(left: DateTime<FixedOffset>, right: DateTime<FixedOffset>) {
    let drift = (left - right).num_microseconds().expect("small drift");
    assert!(drift.abs() <= 1, "{left} vs {right}");
}

#[test]
fn timezone_switch_moves_day_ticks_to_local_midnight() {
    let mut timeline = default_timeline();
    let view = window(utc(2024, 3, 10, 0, 0, 0), utc(2024, 3, 12, 0, 0, 0), false);

    let before = timeline.recompute(&view).expect("utc frame");
    assert!(before.ticks_for(Granularity::Day).all(|tick| tick.time.hour() == 0));

    timeline
        .set_timezone(TimeAxisTimeZone::FixedOffsetMinutes { minutes: 540 })
        .expect("valid offset");
    let after = timeline.recompute(&view).expect("tokyo frame");

    let day_ticks: Vec<_> = after.ticks_for(Granularity::Day).collect();
    assert!(!day_ticks.is_empty());
    for tick in day_ticks {
        assert_eq!(tick.time.offset().local_minus_utc(), 9 * 3_600);
        assert_eq!(tick.time.num_seconds_from_midnight(), 0);
        assert_eq!(tick.time.with_timezone(&Utc).hour(), 15);
    }
    assert!(after.diff.moved.is_empty());
    assert!(after.diff.released.is_empty());
}

#[test]
fn unknown_timezone_is_rejected() {
    let config =
        TimelineConfig::default().with_timezone(TimeAxisTimeZone::Named("Mars/Olympus".to_owned()));
    let err = Timeline::new(NullRenderer::default(), config)
        .err()
        .expect("unknown zone");
    assert!(matches!(err, TimelineError::UnknownTimeZone(name) if name == "Mars/Olympus"));

    let mut timeline = default_timeline();
    assert!(
        timeline
            .set_timezone(TimeAxisTimeZone::Named("Nowhere/Else".to_owned()))
            .is_err()
    );
    assert_eq!(timeline.config().timezone, TimeAxisTimeZone::Utc);
}

#[test]
fn positions_and_times_map_both_ways() {
    let timeline = default_timeline();
    let start = utc(2024, 3, 10, 12, 0, 0);
    let end = utc(2024, 3, 10, 18, 0, 0);
    let forward = window(start, end, false);
    let backward = window(start, end, true);
    let one_pm = utc(2024, 3, 10, 13, 0, 0);

    assert_relative_eq!(timeline.pos_of_time(&one_pm, &forward), 100.0, epsilon = 1e-6);
    assert_relative_eq!(timeline.pos_of_time(&one_pm, &backward), 500.0, epsilon = 1e-6);
    assert_close_in_time(timeline.pos_to_time(300.0, &forward).expect("time"), utc(2024, 3, 10, 15, 0, 0));

    assert_close_in_time(timeline.time_0(&forward).expect("time"), start);
    assert_close_in_time(timeline.time_1(&forward).expect("time"), end);
    assert_close_in_time(timeline.time_0(&backward).expect("time"), end);

    assert_relative_eq!(
        timeline.timedelta_to_dist(TimeDelta::hours(1), &forward),
        100.0,
        epsilon = 1e-9
    );
}

#[test]
fn densest_tick_is_the_finest_drawable_family() {
    let timeline = default_timeline();
    // 300 px per day: hours are 12.5 px apart, quarter hours 3.1 px.
    let densest = timeline.densest_tick(300.0).expect("drawable tick");
    assert_eq!(densest.granularity, Granularity::Hour);
    assert!(timeline.densest_tick(1.0).is_none());
}

#[test]
fn host_measurer_sizes_labels() {
    let config = TimelineConfig::default().with_ticks(vec![TimeTick::new(Granularity::Hour)]);
    let mut timeline = Timeline::new(NullRenderer::default(), config).expect("valid config");
    timeline.set_label_measurer(|text: &str, font_size_px: f64| {
        LabelSize::new(10.0 * text.len() as f64, font_size_px)
    });

    let view = window(utc(2024, 3, 10, 12, 0, 0), utc(2024, 3, 10, 18, 0, 0), false);
    let frame = timeline.render(&view).expect("frame");
    assert!(!frame.labels.is_empty());
    for label in &frame.labels {
        assert_eq!(label.text.len(), 5);
        assert_relative_eq!(label.rect.width, 50.0);
        assert_relative_eq!(label.rect.height, 7.0);
        // 20 px hour ticks plus 5 px padding beat the 22 px time distance.
        assert_relative_eq!(label.rect.x, 25.0);
    }
    assert_eq!(timeline.renderer().last_tick_count, frame.ticks.len());
}

#[test]
fn invalid_updates_are_rejected() {
    let mut timeline = default_timeline();

    let err = timeline
        .set_geometry(AxisGeometry::new(0.0, 0.0, -1.0, 600.0))
        .expect_err("negative width");
    assert!(matches!(err, TimelineError::InvalidGeometry { .. }));

    let labeller = TimeLabellerConfig {
        date_font_size_px: 0.0,
        ..TimeLabellerConfig::default()
    };
    assert!(timeline.set_labeller_config(labeller).is_err());

    let bad_tick = TimeTick::new(Granularity::Hour).with_min_space(f64::NAN);
    assert!(timeline.set_ticks(vec![bad_tick]).is_err());
    assert_eq!(timeline.ticks(), TimeTick::selected().as_slice());
}

#[test]
fn tick_names_resolve_through_the_granularity_table() {
    let config = TimelineConfig::default()
        .with_tick_names(["day", "4 hours", "second"])
        .expect("known names");
    let granularities: Vec<_> = config.ticks.iter().map(|tick| tick.granularity).collect();
    assert_eq!(
        granularities,
        vec![Granularity::Day, Granularity::FourHours, Granularity::Second]
    );

    let err = TimelineConfig::default()
        .with_tick_names(["day", "fortnight"])
        .expect_err("unknown name");
    assert!(matches!(err, TimelineError::UnknownGranularity(name) if name == "fortnight"));
}

#[test]
fn degenerate_window_renders_an_empty_frame() {
    let mut timeline = default_timeline();
    let view = VisibleWindow::new(19_000.0, 19_000.0, 600.0);
    let frame = timeline.render(&view).expect("frame");
    assert!(frame.is_empty());
    assert_eq!(timeline.renderer().last_tick_count, 0);
}

#[cfg(not(feature = "telemetry"))]
#[test]
fn default_tracing_needs_the_telemetry_feature() {
    assert!(!timeline_rs::telemetry::init_default_tracing());
}
