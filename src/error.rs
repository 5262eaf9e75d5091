use thiserror::Error;

use crate::core::PanelId;

pub type ChartResult<T> = Result<T, ChartError>;

/// Axis a projection resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => f.write_str("x"),
            Self::Y => f.write_str("y"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid value range: min={min}, max={max}")]
    InvalidValueRange { min: f64, max: f64 },

    #[error("invalid visible record range: first={first}, last={last}")]
    InvalidVisibleRange { first: f64, last: f64 },

    #[error("projection cannot resolve {axis} axis: scale or frame is missing")]
    UnresolvedAxis { axis: Axis },

    #[error("date series is empty")]
    EmptyDateSeries,

    #[error("unknown panel: {0:?}")]
    UnknownPanel(PanelId),
}
