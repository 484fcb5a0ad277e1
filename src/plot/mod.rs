//! Chart descriptions and the sinks that receive them.
//!
//! Operations never draw into shared state; they build a [`Chart`] and hand
//! it to the [`ChartSink`] held by an explicit [`RenderContext`].

mod chart;
mod context;
mod sink;

pub use chart::{Band, Chart, Line, LineStyle, Stems, VerticalMarker};
pub use context::RenderContext;
pub use sink::{ChartRecorder, ChartSink, JsonChartSink};
