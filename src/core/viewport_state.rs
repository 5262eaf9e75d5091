use serde::{Deserialize, Serialize};

use crate::core::date_scale::DateScaleOptions;
use crate::core::panel::PanelId;
use crate::core::value_scale::{ScaleKind, ValueScaleOptions};
use crate::error::{ChartError, ChartResult};

pub const VIEWPORT_STATE_JSON_SCHEMA_V1: u32 = 1;

/// Value axis state of one panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelViewportState {
    pub panel_id: PanelId,
    pub kind: ScaleKind,
    pub min_visible_value: f64,
    pub max_visible_value: f64,
    #[serde(default)]
    pub needs_auto_scale: bool,
    #[serde(default)]
    pub options: ValueScaleOptions,
}

/// Snapshot of every scale's navigation state.
///
/// Frames are not captured; they are reassigned by the next layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// `None` while the date axis still needs autoscale.
    pub visible_records: Option<(f64, f64)>,
    #[serde(default)]
    pub date_scale: DateScaleOptions,
    pub panels: Vec<PanelViewportState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewportStateJsonContractV1 {
    pub schema_version: u32,
    pub state: ViewportState,
}

impl ViewportState {
    #[must_use]
    pub fn panel(&self, panel_id: PanelId) -> Option<&PanelViewportState> {
        self.panels.iter().find(|panel| panel.panel_id == panel_id)
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ViewportStateJsonContractV1 {
            schema_version: VIEWPORT_STATE_JSON_SCHEMA_V1,
            state: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize viewport state contract v1: {e}"))
        })
    }

    /// Accepts both the versioned contract and a bare state payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(state) = serde_json::from_str::<ViewportState>(input) {
            return Ok(state);
        }
        let payload: ViewportStateJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse viewport state json payload: {e}"))
        })?;
        if payload.schema_version != VIEWPORT_STATE_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported viewport state schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.state)
    }
}
