use serde::{Deserialize, Serialize};

use crate::core::PanelId;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}

/// Pointer movement since the last applied pan step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanDelta {
    pub dx: f64,
    pub dy: f64,
}

impl PanDelta {
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Axis a drag gesture drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PanTarget {
    /// Horizontal drag scrolls the date axis.
    DateScroll,
    /// Vertical drag scrolls a panel's value axis.
    ValueScroll(PanelId),
    /// Vertical drag over a value axis zooms it.
    ValueZoom(PanelId),
}

/// Drag state machine: `Idle -> Panning -> Idle`.
///
/// Deltas are measured from the last applied position, so moves too short
/// for the scales to act on keep accumulating until one is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PanGesture {
    mode: InteractionMode,
    anchor_x: f64,
    anchor_y: f64,
    cursor_x: f64,
    cursor_y: f64,
}

impl PanGesture {
    #[must_use]
    pub fn mode(self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn is_panning(self) -> bool {
        self.mode == InteractionMode::Panning
    }

    pub fn begin(&mut self, x: f64, y: f64) -> ChartResult<()> {
        validate_pointer(x, y)?;
        self.mode = InteractionMode::Panning;
        self.anchor_x = x;
        self.anchor_y = y;
        self.cursor_x = x;
        self.cursor_y = y;
        Ok(())
    }

    /// Updates the pointer and returns the pending delta; zero while idle.
    pub fn move_to(&mut self, x: f64, y: f64) -> ChartResult<PanDelta> {
        validate_pointer(x, y)?;
        if !self.is_panning() {
            return Ok(PanDelta::default());
        }
        self.cursor_x = x;
        self.cursor_y = y;
        Ok(self.pending_delta())
    }

    /// Marks the pending delta as consumed by the chart.
    pub fn mark_applied(&mut self) {
        self.anchor_x = self.cursor_x;
        self.anchor_y = self.cursor_y;
    }

    /// Ends the drag and returns the delta that was never applied.
    pub fn finish(&mut self) -> PanDelta {
        let remainder = if self.is_panning() {
            self.pending_delta()
        } else {
            PanDelta::default()
        };
        *self = Self::default();
        remainder
    }

    fn pending_delta(self) -> PanDelta {
        PanDelta {
            dx: self.cursor_x - self.anchor_x,
            dy: self.cursor_y - self.anchor_y,
        }
    }
}

fn validate_pointer(x: f64, y: f64) -> ChartResult<()> {
    if !x.is_finite() || !y.is_finite() {
        return Err(ChartError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }
    Ok(())
}
