use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::geometry::{distance, is_point_near_point};
use crate::core::projection::Projection;
use crate::core::types::Point;
use crate::error::ChartResult;

/// Horizontal position of a drawing point, in one of three domains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum XCoordinate {
    Pixel(f64),
    Record(f64),
    Date(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum YCoordinate {
    Pixel(f64),
    Value(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XCoordinateKind {
    Pixel,
    Record,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YCoordinateKind {
    Pixel,
    Value,
}

/// Which domain each axis of a [`ChartPoint`] is stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBehavior {
    pub x: XCoordinateKind,
    pub y: YCoordinateKind,
}

impl PointBehavior {
    /// Points that follow their bar and price as the chart scrolls.
    pub const DATE_VALUE: Self = Self {
        x: XCoordinateKind::Date,
        y: YCoordinateKind::Value,
    };
    pub const RECORD_VALUE: Self = Self {
        x: XCoordinateKind::Record,
        y: YCoordinateKind::Value,
    };
    /// Points pinned to the screen.
    pub const PIXEL: Self = Self {
        x: XCoordinateKind::Pixel,
        y: YCoordinateKind::Pixel,
    };
}

/// Drawing anchor whose axes are stored independently by kind.
///
/// Every read and write goes through a [`Projection`]; moving a point keeps
/// the kind of each axis and re-expresses the new pixel position in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub x: XCoordinate,
    pub y: YCoordinate,
}

impl ChartPoint {
    #[must_use]
    pub fn new(x: XCoordinate, y: YCoordinate) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn pixel(point: Point) -> Self {
        Self::new(XCoordinate::Pixel(point.x), YCoordinate::Pixel(point.y))
    }

    #[must_use]
    pub fn at_date(date: DateTime<Utc>, value: f64) -> Self {
        Self::new(XCoordinate::Date(date), YCoordinate::Value(value))
    }

    #[must_use]
    pub fn at_record(record: f64, value: f64) -> Self {
        Self::new(XCoordinate::Record(record), YCoordinate::Value(value))
    }

    #[must_use]
    pub fn behavior(&self) -> PointBehavior {
        PointBehavior {
            x: match self.x {
                XCoordinate::Pixel(_) => XCoordinateKind::Pixel,
                XCoordinate::Record(_) => XCoordinateKind::Record,
                XCoordinate::Date(_) => XCoordinateKind::Date,
            },
            y: match self.y {
                YCoordinate::Pixel(_) => YCoordinateKind::Pixel,
                YCoordinate::Value(_) => YCoordinateKind::Value,
            },
        }
    }

    pub fn x(&self, projection: &Projection<'_>) -> ChartResult<f64> {
        projection.resolve_x(&self.x)
    }

    pub fn y(&self, projection: &Projection<'_>) -> ChartResult<f64> {
        projection.resolve_y(&self.y)
    }

    pub fn date(&self, projection: &Projection<'_>) -> ChartResult<DateTime<Utc>> {
        match self.x {
            XCoordinate::Pixel(x) => projection.date_by_x(x),
            XCoordinate::Record(record) => projection.date_by_record(record),
            XCoordinate::Date(date) => Ok(date),
        }
    }

    pub fn record(&self, projection: &Projection<'_>) -> ChartResult<f64> {
        match self.x {
            XCoordinate::Pixel(x) => projection.record_by_x(x, false),
            XCoordinate::Record(record) => Ok(record),
            XCoordinate::Date(date) => projection.record_by_date(date, false),
        }
    }

    pub fn value(&self, projection: &Projection<'_>) -> ChartResult<f64> {
        match self.y {
            YCoordinate::Pixel(y) => projection.value_by_y(y),
            YCoordinate::Value(value) => Ok(value),
        }
    }

    pub fn to_point(&self, projection: &Projection<'_>) -> ChartResult<Point> {
        projection.cartesian_point(self)
    }

    /// Moves the point to `target`; the point is unchanged on error.
    pub fn move_to(&mut self, target: Point, projection: &Projection<'_>) -> ChartResult<()> {
        *self = projection.chart_point(target, self.behavior())?;
        Ok(())
    }

    pub fn translate(&mut self, dx: f64, dy: f64, projection: &Projection<'_>) -> ChartResult<()> {
        let current = self.to_point(projection)?;
        self.move_to(Point::new(current.x + dx, current.y + dy), projection)
    }

    /// Re-expresses this point in other coordinate kinds.
    pub fn with_behavior(
        &self,
        behavior: PointBehavior,
        projection: &Projection<'_>,
    ) -> ChartResult<Self> {
        let x = match behavior.x {
            XCoordinateKind::Pixel => XCoordinate::Pixel(self.x(projection)?),
            XCoordinateKind::Record => XCoordinate::Record(self.record(projection)?),
            XCoordinateKind::Date => XCoordinate::Date(self.date(projection)?),
        };
        let y = match behavior.y {
            YCoordinateKind::Pixel => YCoordinate::Pixel(self.y(projection)?),
            YCoordinateKind::Value => YCoordinate::Value(self.value(projection)?),
        };
        Ok(Self::new(x, y))
    }
}

impl Projection<'_> {
    /// Record anchors resolve to the exact bar edge, date anchors to the
    /// whole pixel at the bar centre.
    pub fn resolve_x(&self, x: &XCoordinate) -> ChartResult<f64> {
        match *x {
            XCoordinate::Pixel(x) => Ok(x),
            XCoordinate::Record(record) => self.x_by_record(record, false),
            XCoordinate::Date(date) => self.x_by_date(date, true),
        }
    }

    pub fn resolve_y(&self, y: &YCoordinate) -> ChartResult<f64> {
        match *y {
            YCoordinate::Pixel(y) => Ok(y),
            YCoordinate::Value(value) => self.y_by_value(value),
        }
    }

    pub fn cartesian_point(&self, point: &ChartPoint) -> ChartResult<Point> {
        Ok(Point::new(
            self.resolve_x(&point.x)?,
            self.resolve_y(&point.y)?,
        ))
    }

    /// Builds a point at pixel `point`, stored in the kinds of `behavior`.
    pub fn chart_point(&self, point: Point, behavior: PointBehavior) -> ChartResult<ChartPoint> {
        let x = match behavior.x {
            XCoordinateKind::Pixel => XCoordinate::Pixel(point.x),
            XCoordinateKind::Record => XCoordinate::Record(self.record_by_x(point.x, false)?),
            XCoordinateKind::Date => XCoordinate::Date(self.date_by_x(point.x)?),
        };
        let y = match behavior.y {
            YCoordinateKind::Pixel => YCoordinate::Pixel(point.y),
            YCoordinateKind::Value => YCoordinate::Value(self.value_by_y(point.y)?),
        };
        Ok(ChartPoint::new(x, y))
    }

    /// Index of the point nearest to `pointer` among those within hit tolerance.
    ///
    /// Points that cannot be resolved are skipped.
    #[must_use]
    pub fn nearest_point(&self, points: &[ChartPoint], pointer: Point) -> Option<usize> {
        let mut candidates: SmallVec<[(OrderedFloat<f64>, usize); 4]> = SmallVec::new();
        for (index, point) in points.iter().enumerate() {
            let Ok(resolved) = self.cartesian_point(point) else {
                continue;
            };
            if is_point_near_point(pointer, resolved) {
                candidates.push((OrderedFloat(distance(pointer, resolved)), index));
            }
        }

        candidates
            .into_iter()
            .min_by_key(|candidate| candidate.0)
            .map(|(_, index)| index)
    }
}
