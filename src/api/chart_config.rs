use serde::{Deserialize, Serialize};

use crate::core::{DateScaleOptions, Padding, ScaleKind, ValueScaleOptions};
use crate::error::{ChartError, ChartResult};

/// Public chart bootstrap configuration.
///
/// Serializable so host applications can persist and reload chart setup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub date_scale: DateScaleOptions,
    /// Applied to every panel created by the chart.
    #[serde(default)]
    pub value_scale: ValueScaleOptions,
    /// Mapping of the main panel's value axis.
    #[serde(default)]
    pub value_scale_kind: ScaleKind,
    #[serde(default = "default_panel_padding")]
    pub panel_padding: Padding,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            date_scale: DateScaleOptions::default(),
            value_scale: ValueScaleOptions::default(),
            value_scale_kind: ScaleKind::Linear,
            panel_padding: default_panel_padding(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_date_scale_options(mut self, options: DateScaleOptions) -> Self {
        self.date_scale = options;
        self
    }

    #[must_use]
    pub fn with_value_scale_options(mut self, options: ValueScaleOptions) -> Self {
        self.value_scale = options;
        self
    }

    #[must_use]
    pub fn with_value_scale_kind(mut self, kind: ScaleKind) -> Self {
        self.value_scale_kind = kind;
        self
    }

    #[must_use]
    pub fn with_panel_padding(mut self, padding: Padding) -> Self {
        self.panel_padding = padding;
        self
    }

    pub fn validate(self) -> ChartResult<Self> {
        self.date_scale.validate()?;
        self.value_scale.validate()?;
        let padding = self.panel_padding;
        if [padding.left, padding.top, padding.right, padding.bottom]
            .iter()
            .any(|side| !side.is_finite() || *side < 0.0)
        {
            return Err(ChartError::InvalidData(
                "panel padding must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes and validates config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()
    }
}

fn default_panel_padding() -> Padding {
    Padding::new(0.0, 3.0, 0.0, 3.0)
}
