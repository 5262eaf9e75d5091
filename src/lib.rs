//! chart-projection: coordinate projection engine for financial charts.
//!
//! Maps bar records, dates and values to pixels and back through a
//! scroll-relative column space. [`api::Chart`] owns the scales and funnels
//! every mutation; [`core::Projection`] answers read-only queries.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{Chart, ChartConfig};
pub use core::{ChartPoint, DateScale, DateSeries, Projection, ValueScale};
pub use error::{ChartError, ChartResult};
