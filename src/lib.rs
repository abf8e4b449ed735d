//! preview-chart: headless time-series line chart engine.
//!
//! A chart is a set of value series over shared timestamps, shown through a
//! draggable preview window. Every tick eases the window, the Y ceiling, the
//! gridline and label fades and the series toggles a bounded step, then
//! emits draw commands for the regions that are still animating. Surfaces,
//! input capture and scheduling stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, ChartDeck, ChartEngine, TickReport};
pub use error::{ChartError, ChartResult};
