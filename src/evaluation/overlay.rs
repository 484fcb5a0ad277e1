//! Several histories with their forecasts on one chart.

use crate::core::TimeSeries;
use crate::error::Result;
use crate::models::FittedModel;
use crate::plot::RenderContext;

/// A series, the model fitted to it and its legend label.
#[derive(Clone, Copy)]
pub struct LabeledModel<'a> {
    pub label: &'a str,
    pub series: &'a TimeSeries,
    pub model: &'a dyn FittedModel,
}

impl<'a> LabeledModel<'a> {
    pub fn new(label: &'a str, series: &'a TimeSeries, model: &'a dyn FittedModel) -> Self {
        Self {
            label,
            series,
            model,
        }
    }
}

impl std::fmt::Debug for LabeledModel<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabeledModel")
            .field("label", &self.label)
            .field("model", &self.model.name())
            .field("len", &self.series.len())
            .finish()
    }
}

/// Draw each history continued by its `steps`-period forecast mean.
///
/// A dotted vertical marker is placed at the last timestamp of the first
/// entry's history.
pub fn plot_forecasts(
    entries: &[LabeledModel<'_>],
    steps: usize,
    title: Option<&str>,
    ctx: &mut RenderContext<'_>,
) -> Result<()> {
    let mut chart = ctx.chart();

    for entry in entries {
        let forecast = entry.model.forecast(steps, ctx.level())?;

        let mut x = entry.series.timestamps().to_vec();
        x.extend_from_slice(forecast.timestamps());
        let mut y = entry.series.values().to_vec();
        y.extend_from_slice(forecast.mean());

        chart = chart.line(entry.label, &x, &y);
    }

    if let Some(first) = entries.first() {
        chart = chart.vertical_marker(first.series.last_timestamp());
    }
    chart = chart.with_legend("upper left");
    if let Some(title) = title {
        chart = chart.with_title(title);
    }

    ctx.render(chart)
}
