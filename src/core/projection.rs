use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::date_scale::DateScale;
use crate::core::primitives::decimal_to_f64;
use crate::core::value_scale::{ScaleKind, ValueScale};
use crate::error::{Axis, ChartError, ChartResult};

/// Read-only conversion facade over one date scale and one value scale.
///
/// A projection borrows its scales and stores nothing else, so every query
/// reflects the scales' current state. Either scale may be absent: the
/// corresponding axis then fails with [`ChartError::UnresolvedAxis`].
#[derive(Debug, Clone, Copy)]
pub struct Projection<'a> {
    date_scale: Option<&'a DateScale>,
    value_scale: Option<&'a ValueScale>,
}

impl<'a> Projection<'a> {
    #[must_use]
    pub fn new(date_scale: Option<&'a DateScale>, value_scale: Option<&'a ValueScale>) -> Self {
        Self {
            date_scale,
            value_scale,
        }
    }

    #[must_use]
    pub fn date_scale(&self) -> Option<&'a DateScale> {
        self.date_scale
    }

    #[must_use]
    pub fn value_scale(&self) -> Option<&'a ValueScale> {
        self.value_scale
    }

    #[must_use]
    pub fn can_resolve_x(&self) -> bool {
        self.date_scale
            .is_some_and(DateScale::has_resolvable_frame)
    }

    #[must_use]
    pub fn can_resolve_y(&self) -> bool {
        self.value_scale
            .is_some_and(ValueScale::has_resolvable_frame)
    }

    pub fn column_by_record(&self, record: f64, integral: bool) -> ChartResult<f64> {
        Ok(self.x_axis()?.column_by_record(record, integral))
    }

    pub fn record_by_column(&self, column: f64, integral: bool) -> ChartResult<f64> {
        Ok(self.x_axis()?.record_by_column(column, integral))
    }

    pub fn x_by_column(&self, column: f64, integral: bool) -> ChartResult<f64> {
        Ok(self.x_axis()?.x_by_column(column, integral))
    }

    pub fn column_by_x(&self, x: f64, integral: bool) -> ChartResult<f64> {
        Ok(self.x_axis()?.column_by_x(x, integral))
    }

    pub fn x_by_record(&self, record: f64, integral: bool) -> ChartResult<f64> {
        Ok(self.x_axis()?.x_by_record(record, integral))
    }

    pub fn record_by_x(&self, x: f64, integral: bool) -> ChartResult<f64> {
        Ok(self.x_axis()?.record_by_x(x, integral))
    }

    pub fn date_by_record(&self, record: f64) -> ChartResult<DateTime<Utc>> {
        self.x_axis()?.date_by_record(record)
    }

    pub fn record_by_date(&self, date: DateTime<Utc>, integral: bool) -> ChartResult<f64> {
        self.x_axis()?.record_by_date(date, integral)
    }

    pub fn date_by_column(&self, column: f64) -> ChartResult<DateTime<Utc>> {
        self.x_axis()?.date_by_column(column)
    }

    pub fn column_by_date(&self, date: DateTime<Utc>) -> ChartResult<f64> {
        self.x_axis()?.column_by_date(date)
    }

    pub fn x_by_date(&self, date: DateTime<Utc>, integral: bool) -> ChartResult<f64> {
        self.x_axis()?.x_by_date(date, integral)
    }

    pub fn date_by_x(&self, x: f64) -> ChartResult<DateTime<Utc>> {
        self.x_axis()?.date_by_x(x)
    }

    pub fn y_by_value(&self, value: f64) -> ChartResult<f64> {
        let scale = self.y_axis()?;
        if scale.kind() == ScaleKind::Logarithmic && !(value > 0.0) {
            return Err(ChartError::InvalidData(format!(
                "value {value} must be > 0 on a logarithmic scale"
            )));
        }
        Ok(scale.y_by_value(value))
    }

    /// [`Self::y_by_value`] for exact decimal prices.
    pub fn y_by_decimal(&self, value: Decimal) -> ChartResult<f64> {
        self.y_by_value(decimal_to_f64(value, "value")?)
    }

    pub fn value_by_y(&self, y: f64) -> ChartResult<f64> {
        Ok(self.y_axis()?.value_by_y(y))
    }

    /// Projects bar records to x coordinates in one pass.
    pub fn xs_by_records(&self, records: &[f64], integral: bool) -> ChartResult<Vec<f64>> {
        let scale = self.x_axis()?;

        #[cfg(feature = "parallel-projection")]
        {
            Ok(records
                .par_iter()
                .map(|record| scale.x_by_record(*record, integral))
                .collect())
        }

        #[cfg(not(feature = "parallel-projection"))]
        {
            Ok(records
                .iter()
                .map(|record| scale.x_by_record(*record, integral))
                .collect())
        }
    }

    pub(crate) fn x_axis(&self) -> ChartResult<&'a DateScale> {
        self.date_scale
            .filter(|scale| scale.has_resolvable_frame())
            .ok_or(ChartError::UnresolvedAxis { axis: Axis::X })
    }

    pub(crate) fn y_axis(&self) -> ChartResult<&'a ValueScale> {
        self.value_scale
            .filter(|scale| scale.has_resolvable_frame())
            .ok_or(ChartError::UnresolvedAxis { axis: Axis::Y })
    }
}
