use tracing::debug;

use crate::core::{Padding, PanelRegion, Rect};
use crate::error::{ChartError, ChartResult};

use super::Chart;

impl Chart {
    /// Lays panels out inside `frame` with the configured panel padding.
    pub fn layout(&mut self, frame: Rect) -> ChartResult<Vec<PanelRegion>> {
        self.layout_with_padding(frame, self.config.panel_padding)
    }

    /// Splits `frame` vertically by stretch factor and assigns projection frames.
    ///
    /// Each value scale gets its padded panel rect. The date scale spans the
    /// horizontally padded width. A date axis still awaiting autoscale is
    /// autoscaled once it has a frame.
    pub fn layout_with_padding(
        &mut self,
        frame: Rect,
        padding: Padding,
    ) -> ChartResult<Vec<PanelRegion>> {
        if frame.is_degenerate() {
            return Err(ChartError::InvalidData(format!(
                "chart frame must have a positive finite size, got {}x{}",
                frame.width, frame.height
            )));
        }

        let regions = self.panels.layout_regions(frame.top, frame.bottom());
        for region in &regions {
            if let Some(panel) = self.panels.get_mut(region.panel_id) {
                let panel_frame = Rect::new(frame.left, region.top, frame.width, region.height());
                panel.value_scale.set_projection_frame(panel_frame.padded(padding));
            }
        }

        let date_frame = frame.padded(Padding::new(padding.left, 0.0, padding.right, 0.0));
        self.date_scale.set_projection_frame(date_frame);
        if self.date_scale.needs_auto_scale() {
            self.date_scale.auto_scale();
        }

        self.frame = Some(frame);
        debug!(
            width = frame.width,
            height = frame.height,
            panels = regions.len(),
            "chart layout"
        );
        Ok(regions)
    }
}
