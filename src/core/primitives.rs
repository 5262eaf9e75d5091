use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rounds half-way cases towards positive infinity (`-2.5 -> -2`, `2.5 -> 3`).
///
/// Matches JavaScript `Math.round` for every finite input, including
/// `0.49999999999999994 -> 0` where `value + 0.5` would round up.
/// All whole-pixel snapping goes through this; `f64::round` differs on
/// negative halves.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

/// Converts fractional unix milliseconds, rounding to the nearest millisecond.
pub fn unix_millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }
    DateTime::from_timestamp_millis(round_half_up(millis) as i64).ok_or_else(|| {
        ChartError::InvalidData(format!("timestamp {millis}ms is out of range"))
    })
}
