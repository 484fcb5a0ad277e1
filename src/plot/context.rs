//! Explicit rendering state passed to every drawing operation.

use crate::error::Result;
use crate::plot::{Chart, ChartSink};

/// Sink plus figure defaults for one rendering session.
pub struct RenderContext<'a> {
    sink: &'a mut dyn ChartSink,
    figure_size: (f64, f64),
    level: f64,
}

impl<'a> RenderContext<'a> {
    /// Context with a 20x5 figure and 95% confidence bands.
    pub fn new(sink: &'a mut dyn ChartSink) -> Self {
        Self {
            sink,
            figure_size: (20.0, 5.0),
            level: 0.95,
        }
    }

    pub fn with_figure_size(mut self, width: f64, height: f64) -> Self {
        self.figure_size = (width, height);
        self
    }

    /// Confidence level for prediction bands.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    pub fn figure_size(&self) -> (f64, f64) {
        self.figure_size
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    /// Empty chart sized for this context.
    pub fn chart(&self) -> Chart {
        Chart::new(self.figure_size)
    }

    pub fn render(&mut self, chart: Chart) -> Result<()> {
        self.sink.render(chart)
    }
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("figure_size", &self.figure_size)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
