use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_millis, unix_millis_to_datetime};
use crate::error::{ChartError, ChartResult};

/// Ordered bar timestamps indexed by record.
///
/// Dates are strictly increasing. Records outside `[0, len - 1]` are
/// extrapolated with the spacing of the two dates nearest to that end, or
/// with the fallback time interval when fewer than two dates are known.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateSeries {
    dates: Vec<DateTime<Utc>>,
    #[serde(default)]
    time_interval_ms: Option<i64>,
}

impl DateSeries {
    pub fn new(dates: Vec<DateTime<Utc>>) -> ChartResult<Self> {
        if let Some(pair) = dates.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(ChartError::InvalidData(format!(
                "dates must be strictly increasing: {} is followed by {}",
                pair[0], pair[1]
            )));
        }
        Ok(Self {
            dates,
            time_interval_ms: None,
        })
    }

    /// Sets the spacing used for extrapolation while fewer than two dates exist.
    pub fn with_time_interval(mut self, interval: TimeDelta) -> ChartResult<Self> {
        let millis = interval.num_milliseconds();
        if millis <= 0 {
            return Err(ChartError::InvalidData(
                "time interval must be > 0".to_owned(),
            ));
        }
        self.time_interval_ms = Some(millis);
        Ok(self)
    }

    #[must_use]
    pub fn time_interval(&self) -> Option<TimeDelta> {
        self.time_interval_ms.map(TimeDelta::milliseconds)
    }

    /// Appends a bar date; it must be newer than the latest one.
    pub fn push(&mut self, date: DateTime<Utc>) -> ChartResult<()> {
        if let Some(last) = self.dates.last()
            && date <= *last
        {
            return Err(ChartError::InvalidData(format!(
                "appended date {date} must be newer than {last}"
            )));
        }
        self.dates.push(date);
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    #[must_use]
    pub fn dates(&self) -> &[DateTime<Utc>] {
        &self.dates
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<DateTime<Utc>> {
        self.dates.get(index).copied()
    }

    /// Index of the last date `<= date`, or `None` when `date` precedes the series.
    #[must_use]
    pub fn floor_index(&self, date: DateTime<Utc>) -> Option<usize> {
        self.dates
            .partition_point(|known| *known <= date)
            .checked_sub(1)
    }

    /// Date of a possibly fractional, possibly out-of-range record.
    pub fn date_by_record(&self, record: f64) -> ChartResult<DateTime<Utc>> {
        let (Some(first), Some(last)) = (self.dates.first(), self.dates.last()) else {
            return Err(ChartError::EmptyDateSeries);
        };
        if !record.is_finite() {
            return Err(ChartError::InvalidData("record must be finite".to_owned()));
        }

        let last_record = (self.dates.len() - 1) as f64;
        if record < 0.0 {
            let millis = datetime_to_unix_millis(*first) + record * self.leading_interval_ms();
            return unix_millis_to_datetime(millis);
        }
        if record > last_record {
            let millis = datetime_to_unix_millis(*last)
                + (record - last_record) * self.trailing_interval_ms();
            return unix_millis_to_datetime(millis);
        }

        let index = record.floor() as usize;
        let fraction = record - index as f64;
        let date = self.dates[index];
        let Some(next) = self.dates.get(index + 1).filter(|_| fraction > 0.0) else {
            return Ok(date);
        };
        let start = datetime_to_unix_millis(date);
        let span = datetime_to_unix_millis(*next) - start;
        unix_millis_to_datetime(start + span * fraction)
    }

    /// Record of `date`, interpolated between the bracketing bars.
    ///
    /// `integral` floors the result, so any date inside a bar's interval maps
    /// to that bar. With a single date and no fallback interval, dates off the
    /// series map onto record 0.
    pub fn record_by_date(&self, date: DateTime<Utc>, integral: bool) -> ChartResult<f64> {
        let (Some(first), Some(last)) = (self.dates.first(), self.dates.last()) else {
            return Err(ChartError::EmptyDateSeries);
        };

        let time = datetime_to_unix_millis(date);
        let last_index = self.dates.len() - 1;
        let record = match self.floor_index(date) {
            None => {
                extrapolated_offset(time - datetime_to_unix_millis(*first), self.leading_interval_ms())
            }
            Some(index) if index == last_index => {
                last_index as f64
                    + extrapolated_offset(
                        time - datetime_to_unix_millis(*last),
                        self.trailing_interval_ms(),
                    )
            }
            Some(index) => {
                let start = datetime_to_unix_millis(self.dates[index]);
                let end = datetime_to_unix_millis(self.dates[index + 1]);
                index as f64 + (time - start) / (end - start)
            }
        };

        Ok(if integral { record.floor() } else { record })
    }

    fn leading_interval_ms(&self) -> f64 {
        match self.dates.as_slice() {
            [first, second, ..] => datetime_to_unix_millis(*second) - datetime_to_unix_millis(*first),
            _ => self.fallback_interval_ms(),
        }
    }

    fn trailing_interval_ms(&self) -> f64 {
        match self.dates.as_slice() {
            [.., previous, last] => {
                datetime_to_unix_millis(*last) - datetime_to_unix_millis(*previous)
            }
            _ => self.fallback_interval_ms(),
        }
    }

    fn fallback_interval_ms(&self) -> f64 {
        self.time_interval_ms.map_or(0.0, |millis| millis as f64)
    }
}

fn extrapolated_offset(delta_ms: f64, interval_ms: f64) -> f64 {
    if interval_ms > 0.0 {
        delta_ms / interval_ms
    } else {
        0.0
    }
}
