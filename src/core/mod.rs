pub mod chart_point;
pub mod date_scale;
pub mod date_series;
pub mod geometry;
pub mod panel;
pub mod primitives;
pub mod projection;
pub mod types;
pub mod value_scale;
pub mod viewport_state;

pub use chart_point::{
    ChartPoint, PointBehavior, XCoordinate, XCoordinateKind, YCoordinate, YCoordinateKind,
};
pub use date_scale::{
    AutoScrollKind, AutoScrollMode, BarsUpdateKind, DateScale, DateScaleOptions, HistoryRequest,
    ZoomMode,
};
pub use date_series::DateSeries;
pub use panel::{ChartPanel, PanelCollection, PanelId, PanelRegion};
pub use projection::Projection;
pub use types::{Padding, Point, Rect};
pub use value_scale::{ScaleKind, ValueRangeHint, ValueScale, ValueScaleOptions};
pub use viewport_state::{PanelViewportState, ViewportState};
