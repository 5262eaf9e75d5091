use serde::{Deserialize, Serialize};

use crate::core::value_scale::ValueScale;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PanelId(u32);

impl PanelId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// One stacked chart area with its own value axis.
///
/// Only the main panel may map values logarithmically; indicator panels
/// always map linearly.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPanel {
    pub id: PanelId,
    pub is_main: bool,
    pub stretch_factor: f64,
    pub value_scale: ValueScale,
}

impl ChartPanel {
    fn main() -> Self {
        Self {
            id: PanelId::new(0),
            is_main: true,
            stretch_factor: 1.0,
            value_scale: ValueScale::default(),
        }
    }
}

/// Vertical span assigned to a panel by layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelRegion {
    pub panel_id: PanelId,
    pub top: f64,
    pub bottom: f64,
}

impl PanelRegion {
    #[must_use]
    pub fn height(self) -> f64 {
        (self.bottom - self.top).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelCollection {
    panels: Vec<ChartPanel>,
    next_id: u32,
}

impl Default for PanelCollection {
    fn default() -> Self {
        Self {
            panels: vec![ChartPanel::main()],
            next_id: 1,
        }
    }
}

impl PanelCollection {
    #[must_use]
    pub fn panels(&self) -> &[ChartPanel] {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> impl Iterator<Item = &mut ChartPanel> {
        self.panels.iter_mut()
    }

    #[must_use]
    pub fn main_panel_id(&self) -> PanelId {
        // Removal of the main panel is rejected, so one always exists.
        self.panels
            .iter()
            .find(|panel| panel.is_main)
            .map_or(PanelId::new(0), |panel| panel.id)
    }

    #[must_use]
    pub fn get(&self, panel_id: PanelId) -> Option<&ChartPanel> {
        self.panels.iter().find(|panel| panel.id == panel_id)
    }

    pub fn get_mut(&mut self, panel_id: PanelId) -> Option<&mut ChartPanel> {
        self.panels.iter_mut().find(|panel| panel.id == panel_id)
    }

    pub fn create_panel(&mut self, stretch_factor: f64, value_scale: ValueScale) -> ChartResult<PanelId> {
        validate_stretch_factor(stretch_factor)?;
        let panel_id = PanelId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.panels.push(ChartPanel {
            id: panel_id,
            is_main: false,
            stretch_factor,
            value_scale,
        });
        Ok(panel_id)
    }

    pub fn remove_panel(&mut self, panel_id: PanelId) -> ChartResult<bool> {
        if panel_id == self.main_panel_id() {
            return Err(ChartError::InvalidData(
                "cannot remove main panel".to_owned(),
            ));
        }

        let Some(index) = self.panels.iter().position(|panel| panel.id == panel_id) else {
            return Ok(false);
        };
        self.panels.remove(index);
        Ok(true)
    }

    pub fn set_stretch_factor(&mut self, panel_id: PanelId, stretch_factor: f64) -> ChartResult<()> {
        validate_stretch_factor(stretch_factor)?;
        let panel = self
            .get_mut(panel_id)
            .ok_or(ChartError::UnknownPanel(panel_id))?;
        panel.stretch_factor = stretch_factor;
        Ok(())
    }

    /// Splits `top..bottom` by stretch factor, in panel order.
    ///
    /// The last panel absorbs rounding so regions always tile the span.
    #[must_use]
    pub fn layout_regions(&self, top: f64, bottom: f64) -> Vec<PanelRegion> {
        let safe_top = if top.is_finite() { top } else { 0.0 };
        let safe_bottom = if bottom.is_finite() {
            bottom.max(safe_top)
        } else {
            safe_top
        };
        let total_height = safe_bottom - safe_top;

        let weight_sum: f64 = self.panels.iter().map(|panel| panel.stretch_factor).sum();
        let last_index = self.panels.len().saturating_sub(1);
        let mut regions = Vec::with_capacity(self.panels.len());
        let mut cursor = safe_top;
        for (index, panel) in self.panels.iter().enumerate() {
            let next_bottom = if index == last_index {
                safe_bottom
            } else {
                (cursor + total_height * panel.stretch_factor / weight_sum)
                    .clamp(cursor, safe_bottom)
            };
            regions.push(PanelRegion {
                panel_id: panel.id,
                top: cursor,
                bottom: next_bottom,
            });
            cursor = next_bottom;
        }
        regions
    }
}

fn validate_stretch_factor(stretch_factor: f64) -> ChartResult<()> {
    if !stretch_factor.is_finite() || stretch_factor <= 0.0 {
        return Err(ChartError::InvalidData(
            "panel stretch factor must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}
