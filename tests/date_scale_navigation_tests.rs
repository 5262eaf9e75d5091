use chart_projection::core::{
    AutoScrollKind, AutoScrollMode, BarsUpdateKind, DateScale, DateScaleOptions, DateSeries,
    HistoryRequest, Rect, ZoomMode,
};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn minute_dates(count: i64) -> Vec<DateTime<Utc>> {
    let start = Utc
        .with_ymd_and_hms(2014, 2, 1, 0, 1, 0)
        .single()
        .expect("valid start date");
    (0..count).map(|i| start + TimeDelta::minutes(i)).collect()
}

fn date_scale_with(options: DateScaleOptions) -> DateScale {
    let mut scale = DateScale::with_options(options).expect("valid options");
    scale.set_dates(DateSeries::new(minute_dates(10)).expect("increasing dates"));
    scale.set_projection_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
    scale.auto_scale();
    scale
}

fn date_scale() -> DateScale {
    date_scale_with(DateScaleOptions::default())
}

#[test]
fn auto_scale_shows_every_record() {
    let scale = date_scale();
    assert!(!scale.needs_auto_scale());
    assert_eq!(scale.visible_records(), Some((0.0, 9.0)));
    assert_eq!(scale.column_width(), 10.0);
}

#[test]
fn max_allowed_record_includes_right_space() {
    let scale = date_scale();
    assert_eq!(scale.max_allowed_record(), 14.0);
    assert!(scale.can_set_visible_record(14.0));
    assert!(!scale.can_set_visible_record(14.5));
    assert!(!scale.can_set_visible_record(-0.1));
}

#[test]
fn scroll_on_pixels_moves_by_whole_pixel_offset() {
    let mut scale = date_scale();
    assert!(scale.scroll_on_pixels(-20.0).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((2.0, 11.0)));
    assert_eq!(scale.column_width(), 10.0);
}

#[test]
fn short_scroll_is_ignored() {
    let mut scale = date_scale();
    assert!(!scale.scroll_on_pixels(2.0).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((0.0, 9.0)));
}

#[test]
fn non_finite_scroll_is_rejected() {
    let mut scale = date_scale();
    assert!(scale.scroll_on_pixels(f64::NAN).is_err());
    assert!(scale.zoom_on_pixels(f64::INFINITY, 0.0).is_err());
}

#[test]
fn scroll_past_first_bar_pins_to_start() {
    let mut scale = date_scale();
    scale.set_visible_records(1.0, 10.0).expect("valid range");
    assert!(scale.scroll_on_pixels(20.0).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((0.0, 9.0)));
}

#[test]
fn scroll_past_right_space_is_rejected() {
    let mut scale = date_scale();
    assert!(!scale.scroll_on_records(-10.0));
    assert_eq!(scale.visible_records(), Some((0.0, 9.0)));
}

#[test]
fn zoom_on_pixels_shrinks_both_sides() {
    let mut scale = date_scale();
    assert!(scale.zoom_on_pixels(20.0, 20.0).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((2.0, 7.0)));
    assert!((scale.column_width() - 100.0 / 6.0).abs() <= 1e-9);
}

#[test]
fn zoom_respects_min_visible_records() {
    let mut scale = date_scale();
    assert!(!scale.zoom_on_records(3.0, 3.0));
    assert_eq!(scale.visible_records(), Some((0.0, 9.0)));
}

#[test]
fn zoom_out_past_first_bar_resets_start() {
    let mut scale = date_scale();
    scale.set_visible_records(1.0, 9.0).expect("valid range");
    assert!(scale.zoom_on_records(-2.0, 0.0));
    assert_eq!(scale.visible_records(), Some((0.0, 9.0)));
}

#[test]
fn zoom_out_clamps_last_record_to_allowed_space() {
    let mut scale = date_scale();
    scale.set_visible_records(2.0, 9.0).expect("valid range");
    assert!(scale.zoom_on_records(0.0, -20.0));
    assert_eq!(scale.visible_records(), Some((2.0, 13.0)));
}

#[test]
fn pin_left_zoom_keeps_first_record() {
    let mut scale = date_scale_with(DateScaleOptions {
        zoom_mode: ZoomMode::PinLeft,
        ..DateScaleOptions::default()
    });
    assert!(scale.handle_zoom(20.0, 0.9).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((0.0, 7.0)));
}

#[test]
fn pin_mouse_zoom_splits_around_pointer() {
    let mut scale = date_scale_with(DateScaleOptions {
        zoom_mode: ZoomMode::PinMouse,
        ..DateScaleOptions::default()
    });
    assert!(scale.handle_zoom(40.0, 0.25).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((1.0, 6.0)));
}

#[test]
fn whole_bar_mode_rounds_scroll_offsets() {
    let mut scale = date_scale_with(DateScaleOptions {
        allow_partial_records: false,
        ..DateScaleOptions::default()
    });
    assert!(scale.scroll_on_pixels(-13.0).expect("finite pixels"));
    assert_eq!(scale.visible_records(), Some((2.0, 11.0)));
}

#[test]
fn history_is_requested_once_per_completion() {
    let mut scale = date_scale();
    scale.set_visible_records(1.0, 10.0).expect("valid range");

    assert!(scale.scroll_on_pixels(20.0).expect("finite pixels"));
    assert_eq!(scale.take_history_request(), Some(HistoryRequest::MoreBars));
    assert_eq!(scale.take_history_request(), None);

    assert!(scale.scroll_on_pixels(20.0).expect("finite pixels"));
    assert_eq!(scale.take_history_request(), None);

    scale.on_more_history_request_completed();
    assert!(scale.scroll_on_pixels(20.0).expect("finite pixels"));
    assert_eq!(scale.take_history_request(), Some(HistoryRequest::MoreBars));
}

#[test]
fn history_request_resets_after_scrolling_away() {
    let mut scale = date_scale();
    scale.set_visible_records(1.0, 10.0).expect("valid range");
    assert!(scale.scroll_on_pixels(20.0).expect("finite pixels"));
    assert!(scale.take_history_request().is_some());

    assert!(scale.scroll_on_pixels(-30.0).expect("finite pixels"));
    assert!(scale.scroll_on_pixels(30.0).expect("finite pixels"));
    assert_eq!(scale.take_history_request(), Some(HistoryRequest::MoreBars));
}

#[test]
fn hidden_bar_auto_scroll_reveals_new_bar() {
    let mut scale = date_scale_with(DateScaleOptions {
        auto_scroll_kind: AutoScrollKind::HiddenBar,
        ..DateScaleOptions::default()
    });
    let next = minute_dates(11)[10];
    scale.append_date(next).expect("newer date");

    assert!(scale.apply_auto_scroll(BarsUpdateKind::NewBar));
    assert_eq!(scale.visible_records(), Some((1.0, 10.0)));
}

#[test]
fn always_auto_scroll_matches_update_mode() {
    let mut scale = date_scale_with(DateScaleOptions {
        auto_scroll_kind: AutoScrollKind::Always,
        auto_scroll_mode: AutoScrollMode::NewBar,
        ..DateScaleOptions::default()
    });
    let next = minute_dates(11)[10];
    scale.append_date(next).expect("newer date");

    assert!(!scale.apply_auto_scroll(BarsUpdateKind::Tick));
    assert!(scale.apply_auto_scroll(BarsUpdateKind::NewBar));
    assert_eq!(scale.last_visible_record(), 10.0);
}

#[test]
fn auto_scroll_is_off_by_default() {
    let mut scale = date_scale();
    let next = minute_dates(11)[10];
    scale.append_date(next).expect("newer date");
    assert!(!scale.apply_auto_scroll(BarsUpdateKind::NewBar));
}

#[test]
fn visible_date_range_spans_frame_edges() {
    let scale = date_scale();
    let (left, right) = scale.visible_date_range().expect("frame is set");
    let dates = minute_dates(10);
    assert_eq!(left, dates[0] - TimeDelta::seconds(30));
    assert_eq!(right, dates[9] + TimeDelta::seconds(30));
}
