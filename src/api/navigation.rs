use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::{BarsUpdateKind, DateSeries, HistoryRequest, PanelId, ScaleKind};
use crate::error::{Axis, ChartError, ChartResult};
use crate::interaction::{PanDelta, PanTarget};

use super::Chart;

impl Chart {
    /// Replaces the bar dates and shows all of them.
    pub fn set_dates(&mut self, dates: DateSeries) {
        self.date_scale.set_dates(dates);
        self.date_scale.auto_scale();
        for panel in self.panels.panels_mut() {
            panel.value_scale.set_needs_auto_scale();
        }
    }

    /// Records a realtime update and applies auto-scroll.
    ///
    /// A new bar appends `date`; a tick must carry the date of the last bar.
    pub fn append_bar(&mut self, date: DateTime<Utc>, kind: BarsUpdateKind) -> ChartResult<bool> {
        match kind {
            BarsUpdateKind::NewBar => self.date_scale.append_date(date)?,
            BarsUpdateKind::Tick => {
                let last = self.date_scale.dates().dates().last().copied();
                if last != Some(date) {
                    return Err(ChartError::InvalidData(format!(
                        "tick date {date} does not match the last bar"
                    )));
                }
            }
        }
        let scrolled = self.date_scale.apply_auto_scroll(kind);
        trace!(?kind, scrolled, "bar update");
        Ok(scrolled)
    }

    pub fn set_visible_records(&mut self, first: f64, last: f64) -> ChartResult<()> {
        self.date_scale.set_visible_records(first, last)
    }

    pub fn scroll_by_pixels(&mut self, pixels: f64) -> ChartResult<bool> {
        self.date_scale.scroll_on_pixels(pixels)
    }

    /// Zooms the date axis around pointer x according to the zoom mode.
    pub fn zoom_by_pixels(&mut self, pixels: f64, pointer_x: f64) -> ChartResult<bool> {
        let frame = self
            .date_scale
            .projection_frame()
            .filter(|frame| !frame.is_degenerate())
            .ok_or(ChartError::UnresolvedAxis { axis: Axis::X })?;
        let ratio = (pointer_x - frame.left) / frame.width;
        self.date_scale.handle_zoom(pixels, ratio)
    }

    pub fn scroll_value_by_pixels(&mut self, panel_id: PanelId, pixels: f64) -> ChartResult<bool> {
        self.panel_mut(panel_id)?.value_scale.scroll_on_pixels(pixels)
    }

    pub fn zoom_value_by_pixels(&mut self, panel_id: PanelId, pixels: f64) -> ChartResult<bool> {
        self.panel_mut(panel_id)?.value_scale.zoom_on_pixels(pixels)
    }

    /// Fits a panel to the record-indexed `values` inside the visible window.
    ///
    /// Non-finite values are skipped.
    pub fn auto_scale_panel(&mut self, panel_id: PanelId, values: &[f64]) -> ChartResult<()> {
        let window = visible_window(
            values,
            self.date_scale.first_visible_index(),
            self.date_scale.last_visible_index(),
        );
        let extent = finite_extent(window);

        let panel = self.panel_mut(panel_id)?;
        panel.value_scale.auto_scale(extent);
        debug!(panel = panel_id.raw(), ?extent, "auto scaled panel");
        Ok(())
    }

    /// Sets the main panel's mapping mode.
    pub fn set_value_scale_kind(&mut self, kind: ScaleKind) -> ChartResult<()> {
        let main_panel_id = self.main_panel_id();
        self.panel_mut(main_panel_id)?.value_scale.set_kind(kind)?;
        self.config.value_scale_kind = kind;
        Ok(())
    }

    pub fn take_history_request(&mut self) -> Option<HistoryRequest> {
        self.date_scale.take_history_request()
    }

    pub fn on_more_history_request_completed(&mut self) {
        self.date_scale.on_more_history_request_completed();
    }

    /// Routes a drag delta to the axis named by `target`.
    pub fn apply_pan_delta(&mut self, delta: PanDelta, target: PanTarget) -> ChartResult<bool> {
        match target {
            PanTarget::DateScroll => self.scroll_by_pixels(delta.dx),
            PanTarget::ValueScroll(panel_id) => self.scroll_value_by_pixels(panel_id, delta.dy),
            PanTarget::ValueZoom(panel_id) => self.zoom_value_by_pixels(panel_id, delta.dy),
        }
    }
}

fn visible_window(values: &[f64], first_index: i64, last_index: i64) -> &[f64] {
    let Some(max_index) = values.len().checked_sub(1) else {
        return &[];
    };
    let Ok(last) = usize::try_from(last_index) else {
        return &[];
    };
    let first = usize::try_from(first_index.max(0)).unwrap_or(0);
    values.get(first..=last.min(max_index)).unwrap_or(&[])
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|value| value.is_finite())
        .fold(None, |extent, value| {
            Some(extent.map_or((value, value), |(min, max): (f64, f64)| {
                (min.min(value), max.max(value))
            }))
        })
}
