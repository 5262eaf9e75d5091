use chart_projection::core::value_scale::MIN_VALUE_RANGE;
use chart_projection::core::{Rect, ScaleKind, ValueRangeHint, ValueScale, ValueScaleOptions};

fn framed(min: f64, max: f64) -> ValueScale {
    let mut scale = ValueScale::new(min, max).expect("valid range");
    scale.set_projection_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
    scale
}

#[test]
fn logarithmic_mapping_spaces_decades_evenly() {
    let mut scale = framed(1.0, 100.0);
    scale.set_kind(ScaleKind::Logarithmic).expect("positive range");

    assert!((scale.y_by_value(100.0) - 0.0).abs() <= 1e-9);
    assert!((scale.y_by_value(10.0) - 50.0).abs() <= 1e-9);
    assert!((scale.y_by_value(1.0) - 100.0).abs() <= 1e-9);
    assert!((scale.value_by_y(50.0) - 10.0).abs() <= 1e-9);
}

#[test]
fn frame_offset_shifts_linear_mapping() {
    let mut scale = ValueScale::new(0.0, 100.0).expect("valid range");
    scale.set_projection_frame(Rect::new(0.0, 20.0, 100.0, 200.0));
    assert_eq!(scale.y_by_value(100.0), 20.0);
    assert_eq!(scale.y_by_value(50.0), 120.0);
    assert_eq!(scale.value_by_y(220.0), 0.0);
}

#[test]
fn auto_scale_without_data_shows_unit_range() {
    let mut scale = framed(0.0, 1.0);
    scale.set_needs_auto_scale();
    scale.auto_scale(None);
    assert_eq!(scale.visible_range(), (-1.0, 1.0));
    assert!(!scale.needs_auto_scale());
}

#[test]
fn auto_scale_widens_flat_extent() {
    let mut scale = framed(0.0, 1.0);
    scale.auto_scale(Some((5.0, 5.0)));
    assert_eq!(scale.visible_range(), (4.0, 6.0));
    assert_eq!(scale.data_extent(), Some((4.0, 6.0)));
}

#[test]
fn auto_scale_includes_range_hint() {
    let mut scale = ValueScale::with_options(ValueScaleOptions {
        range: ValueRangeHint {
            min: Some(0.0),
            max: None,
        },
        ..ValueScaleOptions::default()
    })
    .expect("valid options");
    scale.auto_scale(Some((5.0, 10.0)));
    assert_eq!(scale.visible_range(), (0.0, 10.0));
}

#[test]
fn logarithmic_auto_scale_lifts_non_positive_minimum() {
    let mut scale = ValueScale::default();
    scale.set_kind(ScaleKind::Logarithmic).expect("awaiting autoscale");
    scale.auto_scale(Some((-5.0, 100.0)));
    let (min, max) = scale.visible_range();
    assert!(min > 0.0);
    assert_eq!(max, 100.0);
}

#[test]
fn value_offset_scales_with_frame_height() {
    let mut scale = ValueScale::new(0.0, 100.0).expect("valid range");
    scale.set_projection_frame(Rect::new(0.0, 0.0, 50.0, 200.0));
    assert_eq!(scale.value_offset(10.0), 5.0);
}

#[test]
fn scroll_on_pixels_shifts_both_bounds() {
    let mut scale = framed(0.0, 100.0);
    assert!(scale.scroll_on_pixels(10.0).expect("finite pixels"));
    assert_eq!(scale.visible_range(), (10.0, 110.0));
    assert!(!scale.scroll_on_pixels(0.0).expect("finite pixels"));
    assert!(scale.scroll_on_pixels(f64::NAN).is_err());
}

#[test]
fn scroll_below_min_allowed_value_is_rejected() {
    let mut scale = ValueScale::with_options(ValueScaleOptions {
        min_allowed_value: Some(0.0),
        ..ValueScaleOptions::default()
    })
    .expect("valid options");
    scale.set_visible_range(0.0, 100.0).expect("valid range");
    assert!(!scale.scroll_on_value(-10.0));
    assert_eq!(scale.visible_range(), (0.0, 100.0));
}

#[test]
fn scroll_keeps_data_inside_allowed_ratios() {
    let mut scale = framed(0.0, 1.0);
    scale.auto_scale(Some((0.0, 100.0)));

    assert!(!scale.scroll_on_value(90.0));
    assert!(scale.scroll_on_value(50.0));
    assert_eq!(scale.visible_range(), (50.0, 150.0));
}

#[test]
fn zoom_out_beyond_range_ratio_is_rejected() {
    let mut scale = framed(0.0, 1.0);
    scale.auto_scale(Some((0.0, 100.0)));
    assert!(!scale.zoom_on_value(500.0));
    assert_eq!(scale.visible_range(), (0.0, 100.0));

    assert!(scale.zoom_on_value(10.0));
    assert_eq!(scale.visible_range(), (-10.0, 110.0));
}

#[test]
fn zoom_in_stops_at_min_value_range() {
    let mut scale = framed(0.0, 0.3);
    assert!(scale.zoom_on_value(-0.15));
    let (min, max) = scale.visible_range();
    assert_eq!(min, 0.0);
    assert!(max - min >= MIN_VALUE_RANGE);

    assert!(!scale.zoom_on_value(-0.1));
    assert_eq!(scale.visible_range(), (min, max));
}

#[test]
fn zoom_on_pixels_uses_value_offset() {
    let mut scale = framed(0.0, 100.0);
    assert!(scale.zoom_on_pixels(5.0).expect("finite pixels"));
    assert_eq!(scale.visible_range(), (-5.0, 105.0));
}

#[test]
fn rejected_options_leave_scale_unchanged() {
    let mut scale = framed(0.0, 100.0);
    let before = scale.options();
    let result = scale.set_options(ValueScaleOptions {
        min_allowed_value_ratio: Some(-1.0),
        ..ValueScaleOptions::default()
    });
    assert!(result.is_err());
    assert_eq!(scale.options(), before);
}

#[test]
fn logarithmic_kind_replaces_pending_placeholder_range() {
    let mut scale = ValueScale::default();
    assert_eq!(scale.visible_range(), (-1.0, 1.0));
    scale.set_kind(ScaleKind::Logarithmic).expect("awaiting autoscale");

    assert!(scale.needs_auto_scale());
    assert_eq!(scale.visible_range(), (1.0, 10.0));
    scale.set_projection_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
    assert!(scale.y_by_value(5.0).is_finite());
    assert!(scale.value_by_y(50.0).is_finite());
}

#[test]
fn linear_kind_keeps_pending_placeholder_range() {
    let mut scale = ValueScale::default();
    scale.set_kind(ScaleKind::Linear).expect("linear kind");
    assert_eq!(scale.visible_range(), (-1.0, 1.0));
    assert!(scale.needs_auto_scale());
}
