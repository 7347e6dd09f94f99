use chrono::{DateTime, FixedOffset, Offset, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Europe::Madrid;
use timeline_rs::core::{
    Granularity, MAX_TICKS_PER_ITER, Orientation, ResolvedTimeZone, TickIter, TimeAxisTimeZone,
    TimeTick, VisibleWindow, global_index_of_time, time_min_max,
};

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s)
        .single()
        .expect("valid utc time")
        .fixed_offset()
}

fn window_between(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    axis_length_px: f64,
) -> VisibleWindow {
    VisibleWindow::centered_on_timeframe(
        &start,
        &end,
        axis_length_px,
        Orientation::Vertical,
        false,
    )
    .expect("valid timeframe")
}

#[test]
fn minute_window_yields_boundaries_plus_one_per_side() {
    let window = window_between(utc(2024, 3, 10, 12, 0, 0), utc(2024, 3, 10, 12, 3, 0), 600.0);
    let ticks: Vec<_> =
        TickIter::new(&TimeTick::new(Granularity::Minute), &window, None, &Utc).collect();

    let expected: Vec<_> = (0..6)
        .map(|step| utc(2024, 3, 10, 11, 59, 0) + TimeDelta::minutes(step))
        .collect();
    assert_eq!(ticks, expected);
}

#[test]
fn consecutive_ticks_are_one_unit_apart() {
    let window = window_between(utc(2024, 3, 10, 9, 7, 13), utc(2024, 3, 10, 17, 41, 2), 900.0);
    for granularity in [
        Granularity::TwelveHours,
        Granularity::FourHours,
        Granularity::Hour,
        Granularity::ThirtyMinutes,
        Granularity::TenMinutes,
    ] {
        let ticks: Vec<_> =
            TickIter::new(&TimeTick::new(granularity), &window, None, &Utc).collect();
        assert!(!ticks.is_empty(), "{granularity} should be drawable");
        for pair in ticks.windows(2) {
            assert_eq!(
                (pair[1] - pair[0]).num_seconds(),
                granularity.seconds_per_unit()
            );
        }
    }
}

#[test]
fn ticks_stay_inside_the_extended_window() {
    let window = window_between(utc(2024, 3, 10, 9, 7, 13), utc(2024, 3, 10, 10, 41, 2), 800.0);
    let tick = TimeTick::new(Granularity::FiveMinutes);
    let (min, max) =
        time_min_max(&window, &Utc, Some(Granularity::FiveMinutes)).expect("in range");

    let ticks: Vec<_> = TickIter::new(&tick, &window, None, &Utc).collect();
    assert!(!ticks.is_empty());
    for time in &ticks {
        assert!(min <= *time && *time <= max);
        assert_eq!(time.minute() % 5, 0);
        assert_eq!(time.second(), 0);
    }
}

#[test]
fn forward_day_ticks_add_the_day_past_the_last_shown() {
    let window = window_between(utc(2024, 3, 10, 6, 0, 0), utc(2024, 3, 12, 18, 0, 0), 600.0);
    let tick = TimeTick::new(Granularity::Day);
    let (_, extended_max) = time_min_max(&window, &Utc, Some(Granularity::Day)).expect("in range");

    let ticks: Vec<_> = TickIter::new(&tick, &window, None, &Utc).collect();
    assert_eq!(
        ticks,
        vec![
            utc(2024, 3, 10, 0, 0, 0),
            utc(2024, 3, 11, 0, 0, 0),
            utc(2024, 3, 12, 0, 0, 0),
            utc(2024, 3, 13, 0, 0, 0),
            utc(2024, 3, 14, 0, 0, 0),
        ]
    );
    let extra = ticks[ticks.len() - 1];
    let last_in_range = ticks[ticks.len() - 2];
    assert!(extra > extended_max);
    assert!(last_in_range <= extended_max);
    assert_eq!(extra - last_in_range, TimeDelta::days(1));
}

#[test]
fn backward_day_ticks_lead_with_the_day_before() {
    let start = utc(2024, 3, 10, 6, 0, 0);
    let end = utc(2024, 3, 12, 18, 0, 0);
    let window = VisibleWindow::centered_on_timeframe(
        &start,
        &end,
        600.0,
        Orientation::Horizontal,
        true,
    )
    .expect("valid timeframe");

    let ticks: Vec<_> =
        TickIter::new(&TimeTick::new(Granularity::Day), &window, None, &Utc).collect();
    assert_eq!(ticks.first(), Some(&utc(2024, 3, 9, 0, 0, 0)));
    assert_eq!(ticks.get(1), Some(&utc(2024, 3, 10, 0, 0, 0)));
    assert_eq!(ticks.last(), Some(&utc(2024, 3, 13, 0, 0, 0)));
}

#[test]
fn day_window_extension_follows_the_densest_granularity() {
    // Window ends 30 minutes before midnight: a one-hour extension reaches
    // the next day boundary, a one-minute extension does not.
    let window = window_between(utc(2024, 3, 10, 6, 0, 0), utc(2024, 3, 10, 23, 30, 0), 600.0);
    let tick = TimeTick::new(Granularity::Day);

    let with_hour: Vec<_> = TickIter::new(&tick, &window, Some(Granularity::Hour), &Utc).collect();
    let with_minute: Vec<_> =
        TickIter::new(&tick, &window, Some(Granularity::Minute), &Utc).collect();

    assert_eq!(
        with_hour,
        vec![utc(2024, 3, 11, 0, 0, 0), utc(2024, 3, 12, 0, 0, 0)]
    );
    assert_eq!(with_minute, vec![utc(2024, 3, 11, 0, 0, 0)]);
}

#[test]
fn day_ticks_align_to_local_midnight() {
    let tokyo = FixedOffset::east_opt(9 * 3_600).expect("valid offset");
    let window = window_between(utc(2024, 3, 10, 0, 0, 0), utc(2024, 3, 13, 0, 0, 0), 600.0);

    let ticks: Vec<_> =
        TickIter::new(&TimeTick::new(Granularity::Day), &window, None, &tokyo).collect();
    assert!(ticks.len() >= 3);
    for time in &ticks {
        assert_eq!(time.offset().local_minus_utc(), 9 * 3_600);
        assert_eq!(time.num_seconds_from_midnight(), 0);
    }
}

fn madrid() -> ResolvedTimeZone {
    TimeAxisTimeZone::Named("Europe/Madrid".to_owned())
        .resolve()
        .expect("known zone")
}

fn assert_matches_madrid_wall_clock(time: &DateTime<FixedOffset>) {
    let local = time.with_timezone(&Madrid);
    assert_eq!(*time.offset(), local.offset().fix(), "{time}");
    assert_eq!(time.naive_local(), local.naive_local(), "{time}");
}

#[test]
fn hour_ticks_follow_the_spring_forward_offset() {
    let tz = madrid();
    let window = window_between(utc(2024, 3, 30, 22, 0, 0), utc(2024, 3, 31, 6, 0, 0), 600.0);
    let ticks: Vec<_> =
        TickIter::new(&TimeTick::new(Granularity::Hour), &window, None, &tz).collect();

    assert!(ticks.len() >= 8);
    for time in &ticks {
        assert_matches_madrid_wall_clock(time);
        assert_eq!(time.minute(), 0);
    }
    let hours: Vec<_> = ticks.iter().map(|time| time.hour()).collect();
    assert!(hours.contains(&1) && hours.contains(&3));
    assert!(!hours.contains(&2), "02:00 does not exist on 2024-03-31: {hours:?}");
    for pair in ticks.windows(2) {
        assert_eq!(pair[1] - pair[0], TimeDelta::hours(1));
    }
}

#[test]
fn day_ticks_stay_on_local_midnight_across_dst_changes() {
    let tz = madrid();
    for (start, end) in [
        (utc(2024, 3, 28, 0, 0, 0), utc(2024, 4, 3, 0, 0, 0)),
        (utc(2024, 10, 24, 0, 0, 0), utc(2024, 10, 30, 0, 0, 0)),
    ] {
        for backward in [false, true] {
            let window = VisibleWindow::centered_on_timeframe(
                &start,
                &end,
                600.0,
                Orientation::Vertical,
                backward,
            )
            .expect("valid timeframe");
            let ticks: Vec<_> =
                TickIter::new(&TimeTick::new(Granularity::Day), &window, None, &tz).collect();

            assert!(ticks.len() >= 6, "{start}: {ticks:?}");
            for time in &ticks {
                assert_matches_madrid_wall_clock(time);
                assert_eq!(time.num_seconds_from_midnight(), 0, "{time}");
            }
            for pair in ticks.windows(2) {
                assert_eq!(
                    pair[0].date_naive().succ_opt(),
                    Some(pair[1].date_naive()),
                    "{} -> {}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }
}

#[test]
fn equal_window_boundaries_yield_nothing() {
    let index = global_index_of_time(&utc(2024, 3, 10, 12, 0, 0));
    for granularity in Granularity::ALL {
        let window = VisibleWindow::new(index, index, 1.0e9);
        let count = TickIter::new(&TimeTick::new(granularity), &window, None, &Utc).count();
        assert_eq!(count, 0, "{granularity}");
    }
}

#[test]
fn non_positive_scale_yields_nothing() {
    let window = VisibleWindow::new(19_000.0, 19_001.0, -10.0);
    let count = TickIter::new(&TimeTick::new(Granularity::Hour), &window, None, &Utc).count();
    assert_eq!(count, 0);
}

#[test]
fn oversized_iteration_is_truncated() {
    // Ten days of second ticks at 8 px per second.
    let window = VisibleWindow::new(19_000.0, 19_010.0, 8.0 * 86_400.0);
    let count = TickIter::new(&TimeTick::new(Granularity::Second), &window, None, &Utc).count();
    assert_eq!(count, MAX_TICKS_PER_ITER);
}
