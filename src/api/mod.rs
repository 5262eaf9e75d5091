mod chart_config;
mod layout;
mod navigation;
mod viewport;

pub use chart_config::ChartConfig;
pub use crate::core::{ChartPanel, PanelId, PanelRegion};

use tracing::debug;

use crate::core::{DateScale, PanelCollection, Projection, Rect, ValueScale};
use crate::error::{ChartError, ChartResult};

/// Chart model: one shared date scale plus a stack of value panels.
///
/// All scale mutation goes through `&mut Chart`, so no [`Projection`]
/// borrowed from it can observe a half-applied change.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    config: ChartConfig,
    date_scale: DateScale,
    panels: PanelCollection,
    frame: Option<Rect>,
}

impl Chart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let date_scale = DateScale::with_options(config.date_scale)?;
        let mut panels = PanelCollection::default();
        let main_panel_id = panels.main_panel_id();
        if let Some(main) = panels.get_mut(main_panel_id) {
            main.value_scale.set_options(config.value_scale)?;
            main.value_scale.set_kind(config.value_scale_kind)?;
        }
        debug!(kind = ?config.value_scale_kind, "created chart");

        Ok(Self {
            config,
            date_scale,
            panels,
            frame: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> ChartConfig {
        self.config
    }

    #[must_use]
    pub fn date_scale(&self) -> &DateScale {
        &self.date_scale
    }

    #[must_use]
    pub fn panels(&self) -> &[ChartPanel] {
        self.panels.panels()
    }

    #[must_use]
    pub fn main_panel_id(&self) -> PanelId {
        self.panels.main_panel_id()
    }

    pub fn panel(&self, panel_id: PanelId) -> ChartResult<&ChartPanel> {
        self.panels
            .get(panel_id)
            .ok_or(ChartError::UnknownPanel(panel_id))
    }

    pub fn value_scale(&self, panel_id: PanelId) -> ChartResult<&ValueScale> {
        Ok(&self.panel(panel_id)?.value_scale)
    }

    /// Frame passed to the last [`Chart::layout`].
    #[must_use]
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    /// Adds an indicator panel below the existing ones; it maps linearly.
    pub fn create_panel(&mut self, stretch_factor: f64) -> ChartResult<PanelId> {
        let value_scale = ValueScale::with_options(self.config.value_scale)?;
        let panel_id = self.panels.create_panel(stretch_factor, value_scale)?;
        debug!(panel = panel_id.raw(), stretch_factor, "created panel");
        Ok(panel_id)
    }

    pub fn remove_panel(&mut self, panel_id: PanelId) -> ChartResult<bool> {
        let removed = self.panels.remove_panel(panel_id)?;
        if removed {
            debug!(panel = panel_id.raw(), "removed panel");
        }
        Ok(removed)
    }

    pub fn set_panel_stretch_factor(
        &mut self,
        panel_id: PanelId,
        stretch_factor: f64,
    ) -> ChartResult<()> {
        self.panels.set_stretch_factor(panel_id, stretch_factor)
    }

    /// Projection over the date scale and `panel_id`'s value scale.
    pub fn projection(&self, panel_id: PanelId) -> ChartResult<Projection<'_>> {
        let panel = self.panel(panel_id)?;
        Ok(Projection::new(
            Some(&self.date_scale),
            Some(&panel.value_scale),
        ))
    }

    /// Projection for time-only queries such as the date axis.
    #[must_use]
    pub fn date_projection(&self) -> Projection<'_> {
        Projection::new(Some(&self.date_scale), None)
    }

    fn panel_mut(&mut self, panel_id: PanelId) -> ChartResult<&mut ChartPanel> {
        self.panels
            .get_mut(panel_id)
            .ok_or(ChartError::UnknownPanel(panel_id))
    }
}
