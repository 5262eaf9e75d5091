use tracing::debug;

use crate::core::{PanelViewportState, ScaleKind, ViewportState};
use crate::error::{ChartError, ChartResult};

use super::Chart;

impl Chart {
    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            visible_records: self.date_scale.visible_records(),
            date_scale: self.date_scale.options(),
            panels: self
                .panels
                .panels()
                .iter()
                .map(|panel| {
                    let (min_visible_value, max_visible_value) = panel.value_scale.visible_range();
                    PanelViewportState {
                        panel_id: panel.id,
                        kind: panel.value_scale.kind(),
                        min_visible_value,
                        max_visible_value,
                        needs_auto_scale: panel.value_scale.needs_auto_scale(),
                        options: panel.value_scale.options(),
                    }
                })
                .collect(),
        }
    }

    /// Restores a snapshot; the chart is left untouched if any part is invalid.
    pub fn restore_viewport_state(&mut self, state: &ViewportState) -> ChartResult<()> {
        let mut date_scale = self.date_scale.clone();
        date_scale.set_options(state.date_scale)?;
        match state.visible_records {
            Some((first, last)) => date_scale.set_visible_records(first, last)?,
            None => date_scale.set_needs_auto_scale(),
        }

        let mut panels = self.panels.clone();
        let main_panel_id = panels.main_panel_id();
        for panel_state in &state.panels {
            let panel = panels
                .get_mut(panel_state.panel_id)
                .ok_or(ChartError::UnknownPanel(panel_state.panel_id))?;
            if !panel.is_main && panel_state.kind != ScaleKind::Linear {
                return Err(ChartError::InvalidData(format!(
                    "panel {} is not the main panel {} and must map linearly",
                    panel_state.panel_id.raw(),
                    main_panel_id.raw()
                )));
            }
            let scale = &mut panel.value_scale;
            scale.set_options(panel_state.options)?;
            if panel_state.needs_auto_scale {
                scale.set_needs_auto_scale();
                scale.set_kind(panel_state.kind)?;
            } else {
                scale.set_kind_and_range(
                    panel_state.kind,
                    panel_state.min_visible_value,
                    panel_state.max_visible_value,
                )?;
            }
        }

        if let Some(main) = panels.get(main_panel_id) {
            self.config.value_scale_kind = main.value_scale.kind();
        }
        self.date_scale = date_scale;
        self.panels = panels;
        debug!(panels = state.panels.len(), "restored viewport state");
        Ok(())
    }
}
