use chart_projection::core::{
    ChartPoint, DateScale, DateSeries, Point, PointBehavior, Projection, Rect, ValueScale,
    XCoordinate, YCoordinate,
};
use chart_projection::error::{Axis, ChartError};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};

fn minute_dates() -> Vec<DateTime<Utc>> {
    let start = Utc
        .with_ymd_and_hms(2014, 2, 1, 0, 1, 0)
        .single()
        .expect("valid start date");
    (0..10).map(|i| start + TimeDelta::minutes(i)).collect()
}

fn scales() -> (DateScale, ValueScale) {
    let mut date_scale = DateScale::default();
    date_scale.set_dates(DateSeries::new(minute_dates()).expect("increasing dates"));
    date_scale.set_projection_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
    date_scale.auto_scale();

    let mut value_scale = ValueScale::new(0.0, 100.0).expect("valid value range");
    value_scale.set_projection_frame(Rect::new(0.0, 0.0, 100.0, 100.0));
    (date_scale, value_scale)
}

fn date(index: usize) -> DateTime<Utc> {
    minute_dates()[index]
}

#[test]
fn record_point_resolves_to_bar_edge() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));

    let point = ChartPoint::at_record(2.0, 60.0);
    assert_eq!(
        point.to_point(&projection).expect("resolvable"),
        Point::new(20.0, 40.0)
    );
}

#[test]
fn date_point_resolves_to_bar_centre() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));

    let point = ChartPoint::at_date(date(1), 60.0);
    assert_eq!(point.x(&projection).expect("resolvable"), 15.0);
    assert_eq!(point.record(&projection).expect("known date"), 1.0);
    assert_eq!(point.date(&projection).expect("stored date"), date(1));
}

#[test]
fn translate_keeps_date_and_value_kinds() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));

    let mut point = ChartPoint::at_date(date(1), 60.0);
    point
        .translate(10.0, -10.0, &projection)
        .expect("resolvable move");
    assert_eq!(point.x, XCoordinate::Date(date(2)));
    assert_eq!(point.y, YCoordinate::Value(70.0));
    assert_eq!(point.behavior(), PointBehavior::DATE_VALUE);
}

#[test]
fn translate_record_point_keeps_fraction() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));

    let mut point = ChartPoint::at_record(2.0, 60.0);
    point.translate(5.0, 0.0, &projection).expect("resolvable move");
    assert_eq!(point.x, XCoordinate::Record(2.5));
    assert_eq!(point.y, YCoordinate::Value(60.0));
}

#[test]
fn pixel_point_converts_to_date_value() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));

    let point = ChartPoint::pixel(Point::new(15.0, 40.0));
    assert_eq!(point.behavior(), PointBehavior::PIXEL);
    let converted = point
        .with_behavior(PointBehavior::DATE_VALUE, &projection)
        .expect("resolvable");
    assert_eq!(converted, ChartPoint::at_date(date(1), 60.0));
}

#[test]
fn chart_point_builds_requested_kinds() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));

    let point = projection
        .chart_point(Point::new(20.0, 40.0), PointBehavior::RECORD_VALUE)
        .expect("resolvable");
    assert_eq!(point, ChartPoint::at_record(2.0, 60.0));
}

#[test]
fn failed_move_leaves_point_unchanged() {
    let (date_scale, _) = scales();
    let projection = Projection::new(Some(&date_scale), None);

    let mut point = ChartPoint::at_date(date(3), 25.0);
    let err = point
        .move_to(Point::new(50.0, 50.0), &projection)
        .expect_err("value axis is missing");
    assert!(matches!(err, ChartError::UnresolvedAxis { axis: Axis::Y }));
    assert_eq!(point, ChartPoint::at_date(date(3), 25.0));
}

#[test]
fn pixel_axes_resolve_without_scales() {
    let projection = Projection::new(None, None);
    let point = ChartPoint::pixel(Point::new(7.0, 9.0));
    assert_eq!(
        point.to_point(&projection).expect("pixels need no scale"),
        Point::new(7.0, 9.0)
    );
    assert!(ChartPoint::at_record(1.0, 1.0).to_point(&projection).is_err());
}

#[test]
fn nearest_point_picks_closest_hit() {
    let (date_scale, value_scale) = scales();
    let projection = Projection::new(Some(&date_scale), Some(&value_scale));
    let points = [
        ChartPoint::at_record(2.0, 60.0),
        ChartPoint::at_record(2.5, 60.0),
        ChartPoint::pixel(Point::new(90.0, 90.0)),
    ];

    assert_eq!(
        projection.nearest_point(&points, Point::new(24.0, 41.0)),
        Some(1)
    );
    assert_eq!(
        projection.nearest_point(&points, Point::new(21.0, 40.0)),
        Some(0)
    );
    assert_eq!(projection.nearest_point(&points, Point::new(60.0, 60.0)), None);
}

#[test]
fn nearest_point_skips_unresolvable_points() {
    let (date_scale, _) = scales();
    let projection = Projection::new(Some(&date_scale), None);
    let points = [
        ChartPoint::at_record(2.0, 60.0),
        ChartPoint::new(XCoordinate::Record(2.0), YCoordinate::Pixel(40.0)),
    ];
    assert_eq!(
        projection.nearest_point(&points, Point::new(20.0, 40.0)),
        Some(1)
    );
}

#[test]
fn chart_point_serializes_tagged_coordinates() {
    let point = ChartPoint::at_date(date(4), 12.5);
    let json = serde_json::to_string(&point).expect("serialize point");
    assert!(json.contains("\"kind\":\"date\""));
    assert!(json.contains("\"kind\":\"value\""));

    let parsed: ChartPoint = serde_json::from_str(&json).expect("deserialize point");
    assert_eq!(parsed, point);
}
