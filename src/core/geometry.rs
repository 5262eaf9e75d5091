//! Pixel-space hit testing for resolved chart points.
//!
//! Every "near" test uses the same tolerance, [`DEVIATION`].

use crate::core::types::{Point, Rect};

/// Hit-test tolerance in pixels.
pub const DEVIATION: f64 = 5.0;

#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

#[must_use]
pub fn is_value_near_value(value: f64, other: f64) -> bool {
    (value - other).abs() <= DEVIATION
}

/// Bounds may be given in either order.
#[must_use]
pub fn is_value_between_or_near_values(value: f64, bound_a: f64, bound_b: f64) -> bool {
    value >= bound_a.min(bound_b) - DEVIATION && value <= bound_a.max(bound_b) + DEVIATION
}

#[must_use]
pub fn is_point_near_point(point: Point, other: Point) -> bool {
    is_value_near_value(point.x, other.x) && is_value_near_value(point.y, other.y)
}

#[must_use]
pub fn is_point_near_any_point(point: Point, candidates: &[Point]) -> bool {
    candidates
        .iter()
        .any(|candidate| is_point_near_point(point, *candidate))
}

#[must_use]
pub fn is_point_inside_or_near_rect(point: Point, rect: Rect) -> bool {
    is_value_between_or_near_values(point.x, rect.left, rect.right())
        && is_value_between_or_near_values(point.y, rect.top, rect.bottom())
}

/// Box spanned by two corner points, in any order.
#[must_use]
pub fn is_point_inside_or_near_rect_points(point: Point, corner_a: Point, corner_b: Point) -> bool {
    is_value_between_or_near_values(point.x, corner_a.x, corner_b.x)
        && is_value_between_or_near_values(point.y, corner_a.y, corner_b.y)
}

/// Whether `point` lies near the segment `start..end`.
///
/// Near-vertical segments are tested horizontally, the rest vertically.
#[must_use]
pub fn is_point_near_line(point: Point, start: Point, end: Point) -> bool {
    if !is_point_inside_or_near_rect_points(point, start, end) {
        return false;
    }
    if (start.x - end.x).abs() <= DEVIATION {
        return true;
    }

    let slope = (start.y - end.y) / (start.x - end.x);
    let angle = slope.atan().to_degrees().abs();
    if (angle - 90.0).abs() <= 10.0 {
        let x = (point.y - (start.y - start.x * slope)) / slope;
        is_value_near_value(x, point.x)
    } else {
        let y = start.y + slope * (point.x - start.x);
        is_value_near_value(y, point.y)
    }
}

#[must_use]
pub fn is_point_near_polyline(point: Point, vertices: &[Point]) -> bool {
    vertices
        .windows(2)
        .any(|segment| is_point_near_line(point, segment[0], segment[1]))
}

/// Like [`is_point_near_polyline`] with the closing edge included.
#[must_use]
pub fn is_point_near_polygon(point: Point, vertices: &[Point]) -> bool {
    let [first, .., last] = vertices else {
        return false;
    };
    is_point_near_polyline(point, vertices) || is_point_near_line(point, *last, *first)
}

#[cfg(test)]
mod tests {
    use super::{
        distance, is_point_near_line, is_point_near_polygon, is_value_between_or_near_values,
    };
    use crate::core::types::Point;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn between_accepts_reversed_bounds() {
        assert!(is_value_between_or_near_values(12.0, 10.0, 0.0));
        assert!(is_value_between_or_near_values(15.0, 10.0, 0.0));
        assert!(!is_value_between_or_near_values(15.1, 10.0, 0.0));
    }

    #[test]
    fn diagonal_line_hit_uses_vertical_distance() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(100.0, 100.0);
        assert!(is_point_near_line(Point::new(50.0, 54.0), start, end));
        assert!(!is_point_near_line(Point::new(50.0, 60.0), start, end));
        assert!(!is_point_near_line(Point::new(120.0, 120.0), start, end));
    }

    #[test]
    fn polygon_includes_closing_edge() {
        let triangle = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        assert!(is_point_near_polygon(Point::new(30.0, 32.0), &triangle));
        assert!(!is_point_near_polygon(Point::new(30.0, 32.0), &triangle[..1]));
    }
}
