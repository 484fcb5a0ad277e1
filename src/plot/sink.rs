//! Destinations for rendered charts.

use crate::error::{ForecastError, Result};
use crate::plot::Chart;
use std::io::Write;

/// Receives finished charts.
///
/// Nothing in the crate reads a value back from a sink; the artifact is the
/// side effect.
pub trait ChartSink {
    fn render(&mut self, chart: Chart) -> Result<()>;
}

/// Keeps every chart in memory.
#[derive(Debug, Clone, Default)]
pub struct ChartRecorder {
    charts: Vec<Chart>,
}

impl ChartRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn charts(&self) -> &[Chart] {
        &self.charts
    }

    pub fn last(&self) -> Option<&Chart> {
        self.charts.last()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn into_charts(self) -> Vec<Chart> {
        self.charts
    }
}

impl ChartSink for ChartRecorder {
    fn render(&mut self, chart: Chart) -> Result<()> {
        self.charts.push(chart);
        Ok(())
    }
}

/// Writes each chart as one line of JSON.
#[derive(Debug)]
pub struct JsonChartSink<W> {
    writer: W,
}

impl<W: Write> JsonChartSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ChartSink for JsonChartSink<W> {
    fn render(&mut self, chart: Chart) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &chart)
            .map_err(|e| ForecastError::Render(e.to_string()))?;
        writeln!(self.writer).map_err(|e| ForecastError::Render(e.to_string()))
    }
}
