use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::date_series::DateSeries;
use crate::core::primitives::round_half_up;
use crate::core::types::Rect;
use crate::error::{Axis, ChartError, ChartResult};

/// Scroll gestures shorter than this are ignored.
pub const MIN_SCROLL_PIXELS: f64 = 3.0;
/// Zoom gestures shorter than this on both sides are ignored.
pub const MIN_ZOOM_PIXELS: f64 = 3.0;

/// Which edge stays put while the time axis zooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ZoomMode {
    #[default]
    PinCenter,
    PinLeft,
    PinRight,
    /// Splits the zoom around the pointer position.
    PinMouse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AutoScrollKind {
    #[default]
    None,
    /// Scroll whenever the newest bar is outside the visible range.
    HiddenBar,
    /// Scroll only for updates matching `AutoScrollMode`.
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AutoScrollMode {
    #[default]
    NewBar,
    Tick,
}

/// Kind of realtime update that reached the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarsUpdateKind {
    Tick,
    NewBar,
}

/// Raised once the first bar scrolls into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRequest {
    MoreBars,
}

impl BarsUpdateKind {
    fn matches(self, mode: AutoScrollMode) -> bool {
        matches!(
            (self, mode),
            (Self::Tick, AutoScrollMode::Tick) | (Self::NewBar, AutoScrollMode::NewBar)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateScaleOptions {
    /// When `false`, visible records are snapped to whole bars.
    pub allow_partial_records: bool,
    pub min_visible_records: f64,
    /// Empty space allowed past the last bar, as a ratio of the frame width.
    pub right_additional_space_ratio: f64,
    #[serde(default)]
    pub zoom_mode: ZoomMode,
    #[serde(default)]
    pub auto_scroll_kind: AutoScrollKind,
    #[serde(default)]
    pub auto_scroll_mode: AutoScrollMode,
}

impl Default for DateScaleOptions {
    fn default() -> Self {
        Self {
            allow_partial_records: true,
            min_visible_records: 5.0,
            right_additional_space_ratio: 0.5,
            zoom_mode: ZoomMode::PinCenter,
            auto_scroll_kind: AutoScrollKind::None,
            auto_scroll_mode: AutoScrollMode::NewBar,
        }
    }
}

impl DateScaleOptions {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_visible_records.is_finite() || self.min_visible_records <= 0.0 {
            return Err(ChartError::InvalidData(
                "min visible records must be finite and > 0".to_owned(),
            ));
        }
        if !self.right_additional_space_ratio.is_finite() || self.right_additional_space_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "right additional space ratio must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Time-axis state: visible records, pixel frame and the bar dates.
///
/// Conversions chain through three invertible maps (record, column, x) plus
/// the interpolating record/date map of [`DateSeries`]. The `integral` flag
/// selects whole-bar/whole-pixel results; the fractional form is the ground
/// truth and the integral form only truncates or rounds it:
///
/// - record -> column: `trunc`
/// - column -> record: `trunc`
/// - x -> column: `floor`
/// - column -> x: half-bar centering, then half-up rounding
#[derive(Debug, Clone, PartialEq)]
pub struct DateScale {
    options: DateScaleOptions,
    dates: DateSeries,
    visible: Option<(f64, f64)>,
    projection_frame: Option<Rect>,
    column_width: f64,
    more_history_requested: bool,
    pending_history: Option<HistoryRequest>,
}

impl Default for DateScale {
    fn default() -> Self {
        Self::new(DateScaleOptions::default())
    }
}

impl DateScale {
    #[must_use]
    pub fn new(options: DateScaleOptions) -> Self {
        Self {
            options,
            dates: DateSeries::default(),
            visible: None,
            projection_frame: None,
            column_width: 0.0,
            more_history_requested: false,
            pending_history: None,
        }
    }

    pub fn with_options(options: DateScaleOptions) -> ChartResult<Self> {
        Ok(Self::new(options.validate()?))
    }

    #[must_use]
    pub fn options(&self) -> DateScaleOptions {
        self.options
    }

    pub fn set_options(&mut self, options: DateScaleOptions) -> ChartResult<()> {
        let options = options.validate()?;
        let snap_to_bars = self.options.allow_partial_records && !options.allow_partial_records;
        self.options = options;
        if snap_to_bars && let Some((first, last)) = self.visible {
            self.commit_visible(first.trunc(), last.trunc());
        }
        Ok(())
    }

    #[must_use]
    pub fn dates(&self) -> &DateSeries {
        &self.dates
    }

    pub fn set_dates(&mut self, dates: DateSeries) {
        debug!(count = dates.len(), "set date series");
        self.dates = dates;
    }

    pub fn append_date(&mut self, date: DateTime<Utc>) -> ChartResult<()> {
        self.dates.push(date)
    }

    #[must_use]
    pub fn record_count(&self) -> usize {
        self.dates.len()
    }

    #[must_use]
    pub fn projection_frame(&self) -> Option<Rect> {
        self.projection_frame
    }

    pub fn set_projection_frame(&mut self, frame: Rect) {
        debug!(
            left = frame.left,
            width = frame.width,
            "set date scale projection frame"
        );
        self.projection_frame = Some(frame);
        self.calculate_projection_metrics();
    }

    /// True when the attached frame can back x conversions.
    #[must_use]
    pub fn has_resolvable_frame(&self) -> bool {
        self.projection_frame.is_some_and(|frame| !frame.is_degenerate())
    }

    /// Pixels per record for the current frame and visible span.
    #[must_use]
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Visible span in records, `0.0` until a range is set.
    #[must_use]
    pub fn columns_count(&self) -> f64 {
        self.visible.map_or(0.0, |(first, last)| last - first + 1.0)
    }

    #[must_use]
    pub fn visible_records(&self) -> Option<(f64, f64)> {
        self.visible
    }

    #[must_use]
    pub fn first_visible_record(&self) -> f64 {
        self.visible.map_or(0.0, |(first, _)| first)
    }

    #[must_use]
    pub fn last_visible_record(&self) -> f64 {
        self.visible.map_or(0.0, |(_, last)| last)
    }

    #[must_use]
    pub fn first_visible_index(&self) -> i64 {
        self.first_visible_record().floor() as i64
    }

    #[must_use]
    pub fn last_visible_index(&self) -> i64 {
        self.last_visible_record().ceil() as i64
    }

    #[must_use]
    pub fn needs_auto_scale(&self) -> bool {
        self.visible.is_none()
    }

    pub fn set_needs_auto_scale(&mut self) {
        self.visible = None;
        self.calculate_projection_metrics();
    }

    /// Shows every known record.
    pub fn auto_scale(&mut self) {
        let count = self.dates.len();
        if count == 0 {
            self.set_needs_auto_scale();
            return;
        }
        self.commit_visible(0.0, (count - 1) as f64);
    }

    /// Sets both visible bounds; the record width follows the new span.
    pub fn set_visible_records(&mut self, first: f64, last: f64) -> ChartResult<()> {
        if !first.is_finite() || !last.is_finite() || first > last {
            return Err(ChartError::InvalidVisibleRange { first, last });
        }
        let (first, last) = if self.options.allow_partial_records {
            (first, last)
        } else {
            (first.trunc(), last.trunc())
        };
        self.commit_visible(first, last);
        Ok(())
    }

    /// Scrolls so `record` is the leftmost visible record, keeping the span.
    pub fn set_first_visible_record(&mut self, record: f64) -> ChartResult<()> {
        let span = self.visible.map_or(0.0, |(first, last)| last - first);
        self.set_visible_records(record, record + span)
    }

    /// `record - trunc(first_visible_record)`, truncated when `integral`.
    #[must_use]
    pub fn column_by_record(&self, record: f64, integral: bool) -> f64 {
        let column = record - self.base_record();
        if integral { column.trunc() } else { column }
    }

    /// Inverse of [`Self::column_by_record`].
    #[must_use]
    pub fn record_by_column(&self, column: f64, integral: bool) -> f64 {
        let record = column + self.base_record();
        if integral { record.trunc() } else { record }
    }

    /// Integral columns map to their bar centre, snapped to a whole pixel.
    /// Fractional columns map to their exact left-edge position.
    #[must_use]
    pub fn x_by_column(&self, column: f64, integral: bool) -> f64 {
        if integral {
            round_half_up(self.column_center_x(column))
        } else {
            self.column_left_x(column)
        }
    }

    /// Unrounded centre of `column`'s bar.
    #[must_use]
    pub fn column_center_x(&self, column: f64) -> f64 {
        self.column_left_x(column) + self.column_width / 2.0
    }

    /// Column enclosing `x` when `integral`, exact column otherwise.
    #[must_use]
    pub fn column_by_x(&self, x: f64, integral: bool) -> f64 {
        let column = (x - self.frame_left() + self.first_column_offset()) / self.column_width;
        if integral { column.floor() } else { column }
    }

    #[must_use]
    pub fn x_by_record(&self, record: f64, integral: bool) -> f64 {
        self.x_by_column(self.column_by_record(record, integral), integral)
    }

    #[must_use]
    pub fn record_by_x(&self, x: f64, integral: bool) -> f64 {
        self.record_by_column(self.column_by_x(x, integral), integral)
    }

    pub fn date_by_record(&self, record: f64) -> ChartResult<DateTime<Utc>> {
        self.dates.date_by_record(record)
    }

    pub fn record_by_date(&self, date: DateTime<Utc>, integral: bool) -> ChartResult<f64> {
        self.dates.record_by_date(date, integral)
    }

    pub fn date_by_column(&self, column: f64) -> ChartResult<DateTime<Utc>> {
        self.date_by_record(self.record_by_column(column, true))
    }

    /// Column of the bar whose pixel span encloses `date`.
    pub fn column_by_date(&self, date: DateTime<Utc>) -> ChartResult<f64> {
        Ok(self.column_by_x(self.x_by_date(date, false)?, true))
    }

    /// Bar centres are the anchor: a known date maps to its bar's centre and
    /// dates between bars interpolate linearly between the two centres.
    pub fn x_by_date(&self, date: DateTime<Utc>, integral: bool) -> ChartResult<f64> {
        let record = self.record_by_date(date, false)?;
        let x = self.column_center_x(self.column_by_record(record, false));
        Ok(if integral { round_half_up(x) } else { x })
    }

    /// Date under whole pixel `round(x)`.
    pub fn date_by_x(&self, x: f64) -> ChartResult<DateTime<Utc>> {
        let x = round_half_up(x);
        let column = self.column_by_x(x, false) - 0.5;
        self.date_by_record(self.record_by_column(column, false))
    }

    /// Dates at the left and right edges of the frame.
    pub fn visible_date_range(&self) -> ChartResult<(DateTime<Utc>, DateTime<Utc>)> {
        let frame = self
            .projection_frame
            .ok_or(ChartError::UnresolvedAxis { axis: Axis::X })?;
        Ok((self.date_by_x(frame.left)?, self.date_by_x(frame.right())?))
    }

    /// Rightmost record the first or last visible record may reach.
    #[must_use]
    pub fn max_allowed_record(&self) -> f64 {
        let last_record = self.dates.len() as f64 - 1.0;
        let frame_width = self.projection_frame.map_or(0.0, |frame| frame.width);
        if self.column_width <= 0.0 {
            return last_record;
        }
        last_record + frame_width * self.options.right_additional_space_ratio / self.column_width
    }

    #[must_use]
    pub fn can_set_visible_record(&self, record: f64) -> bool {
        record >= 0.0 && record <= self.max_allowed_record()
    }

    /// Scrolls by a pointer offset; positive pixels reveal older bars.
    pub fn scroll_on_pixels(&mut self, pixels: f64) -> ChartResult<bool> {
        if !pixels.is_finite() {
            return Err(ChartError::InvalidData(
                "scroll pixels must be finite".to_owned(),
            ));
        }
        if pixels.abs() < MIN_SCROLL_PIXELS || self.column_width <= 0.0 {
            return Ok(false);
        }
        let mut records = pixels.abs() / self.column_width;
        if !self.options.allow_partial_records {
            records = records.ceil();
        }
        Ok(self.scroll_on_records(records.copysign(pixels)))
    }

    /// Moves both visible bounds by `-records`.
    ///
    /// A scroll past the first bar pins the first visible record to 0.
    /// Any other move outside the allowed records is rejected.
    pub fn scroll_on_records(&mut self, records: f64) -> bool {
        let Some((old_first, old_last)) = self.visible else {
            return false;
        };
        if records == 0.0 || !records.is_finite() {
            return false;
        }

        let mut new_first = old_first - records;
        let mut new_last = old_last - records;
        if !self.options.allow_partial_records {
            new_first = round_half_up(new_first);
            new_last = round_half_up(new_last);
        }

        if !self.can_set_visible_record(new_first) || !self.can_set_visible_record(new_last) {
            if new_first >= 0.0 {
                return false;
            }
            new_first = 0.0;
            new_last = old_last - old_first;
            if !self.can_set_visible_record(new_first) || !self.can_set_visible_record(new_last) {
                return false;
            }
        }

        trace!(records, new_first, new_last, "scroll date scale");
        self.commit_visible(new_first, new_last);
        self.request_more_history_if_needed();
        true
    }

    /// Zooms by pointer offsets; positive values shrink the range from that side.
    pub fn zoom_on_pixels(&mut self, left_pixels: f64, right_pixels: f64) -> ChartResult<bool> {
        if !left_pixels.is_finite() || !right_pixels.is_finite() {
            return Err(ChartError::InvalidData(
                "zoom pixels must be finite".to_owned(),
            ));
        }
        if (left_pixels.abs() < MIN_ZOOM_PIXELS && right_pixels.abs() < MIN_ZOOM_PIXELS)
            || self.column_width <= 0.0
        {
            return Ok(false);
        }

        let mut left_records = left_pixels.abs() / self.column_width;
        let mut right_records = right_pixels.abs() / self.column_width;
        if !self.options.allow_partial_records {
            left_records = left_records.ceil();
            right_records = right_records.ceil();
        }
        Ok(self.zoom_on_records(
            if left_pixels > 0.0 { left_records } else { -left_records },
            if right_pixels > 0.0 { right_records } else { -right_records },
        ))
    }

    /// Moves the first bound by `+left_records` and the last by `-right_records`.
    pub fn zoom_on_records(&mut self, left_records: f64, right_records: f64) -> bool {
        let Some((old_first, old_last)) = self.visible else {
            return false;
        };
        if left_records == 0.0 && right_records == 0.0 {
            return false;
        }
        if !left_records.is_finite() || !right_records.is_finite() {
            return false;
        }

        let mut new_first = old_first + left_records;
        let mut new_last = old_last - right_records;
        if !self.options.allow_partial_records {
            new_first = round_half_up(new_first);
            new_last = round_half_up(new_last);
        }
        if new_first > new_last {
            new_last = new_last.max(old_last);
            new_first = new_last;
        }

        if !self.can_set_visible_record(new_first) {
            // Zooming out past the first bar snaps the range to the data start.
            let changed = old_first != 0.0;
            self.commit_visible(0.0, old_last.max(0.0));
            self.request_more_history_if_needed();
            return changed;
        }
        if !self.can_set_visible_record(new_last) {
            new_last = self.max_allowed_record();
        }

        let changed = new_first != old_first || new_last != old_last;
        if changed {
            let new_visible = new_last - new_first + 1.0;
            if new_visible < self.options.min_visible_records {
                return false;
            }
            if new_first >= self.dates.len() as f64 {
                return false;
            }
            trace!(new_first, new_last, "zoom date scale");
            self.commit_visible(new_first, new_last);
            self.request_more_history_if_needed();
        }
        changed
    }

    /// Applies a zoom gesture according to the configured [`ZoomMode`].
    ///
    /// `pointer_ratio` is the pointer position across the frame in `[0, 1]`;
    /// only `PinMouse` reads it.
    pub fn handle_zoom(&mut self, pixels: f64, pointer_ratio: f64) -> ChartResult<bool> {
        match self.options.zoom_mode {
            ZoomMode::PinCenter => self.zoom_on_pixels(pixels, pixels),
            ZoomMode::PinLeft => self.zoom_on_pixels(0.0, pixels),
            ZoomMode::PinRight => self.zoom_on_pixels(pixels, 0.0),
            ZoomMode::PinMouse => {
                let ratio = pointer_ratio.clamp(0.0, 1.0);
                self.zoom_on_pixels(pixels * ratio, pixels * (1.0 - ratio))
            }
        }
    }

    /// Brings the newest bar into view after a realtime update.
    pub fn apply_auto_scroll(&mut self, kind: BarsUpdateKind) -> bool {
        let Some((_, last)) = self.visible else {
            return false;
        };
        let forward = last - self.dates.len() as f64 + 1.0;
        if forward >= 0.0 {
            return false;
        }
        match self.options.auto_scroll_kind {
            AutoScrollKind::None => false,
            AutoScrollKind::HiddenBar => self.scroll_on_records(forward),
            AutoScrollKind::Always if kind.matches(self.options.auto_scroll_mode) => {
                self.scroll_on_records(forward)
            }
            AutoScrollKind::Always => false,
        }
    }

    /// Flags a request for older bars once the first bar becomes visible.
    ///
    /// A new request is only raised after the previous one completes.
    pub fn request_more_history_if_needed(&mut self) {
        if self.first_visible_index() > 0 {
            self.more_history_requested = false;
        } else if !self.more_history_requested {
            debug!("requesting more history");
            self.more_history_requested = true;
            self.pending_history = Some(HistoryRequest::MoreBars);
        }
    }

    /// Returns and clears the pending history request.
    pub fn take_history_request(&mut self) -> Option<HistoryRequest> {
        self.pending_history.take()
    }

    pub fn on_more_history_request_completed(&mut self) {
        self.more_history_requested = false;
    }

    fn commit_visible(&mut self, first: f64, last: f64) {
        if self.visible != Some((first, last)) {
            debug!(first, last, "visible records changed");
        }
        self.visible = Some((first, last));
        self.calculate_projection_metrics();
    }

    fn calculate_projection_metrics(&mut self) {
        let count = self.columns_count();
        self.column_width = match self.projection_frame {
            Some(frame) if !frame.is_degenerate() && count > 0.0 => frame.width / count,
            _ => 0.0,
        };
    }

    fn base_record(&self) -> f64 {
        self.first_visible_record().trunc()
    }

    fn first_column_offset(&self) -> f64 {
        self.first_visible_record().fract() * self.column_width
    }

    fn frame_left(&self) -> f64 {
        self.projection_frame.map_or(0.0, |frame| frame.left)
    }

    fn column_left_x(&self, column: f64) -> f64 {
        self.frame_left() - self.first_column_offset() + column * self.column_width
    }
}
