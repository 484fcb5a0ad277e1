//! Backend-neutral chart description.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Stroke style of a line or marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStyle {
    #[default]
    Solid,
    Dotted,
}

/// A labelled series drawn against time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub label: String,
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<f64>,
    pub color: Option<String>,
    pub alpha: f64,
    pub style: LineStyle,
}

/// A shaded region between two curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Band {
    pub x: Vec<DateTime<Utc>>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    pub color: String,
    pub alpha: f64,
}

/// A vertical rule at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalMarker {
    pub at: DateTime<Utc>,
    pub color: String,
    pub style: LineStyle,
}

/// Correlogram stems with a symmetric significance band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stems {
    pub lags: Vec<usize>,
    pub values: Vec<f64>,
    /// Half-width of the band around zero.
    pub significance: f64,
}

/// Everything a sink needs to draw one figure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: Option<String>,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    pub lines: Vec<Line>,
    pub bands: Vec<Band>,
    pub markers: Vec<VerticalMarker>,
    pub stems: Option<Stems>,
    pub legend: Option<String>,
}

impl Chart {
    pub fn new(figure_size: (f64, f64)) -> Self {
        Self {
            title: None,
            figure_size,
            lines: Vec::new(),
            bands: Vec::new(),
            markers: Vec::new(),
            stems: None,
            legend: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_legend(mut self, position: impl Into<String>) -> Self {
        self.legend = Some(position.into());
        self
    }

    /// Add a solid, fully opaque line in the sink's default color.
    pub fn line(mut self, label: impl Into<String>, x: &[DateTime<Utc>], y: &[f64]) -> Self {
        self.lines.push(Line {
            label: label.into(),
            x: x.to_vec(),
            y: y.to_vec(),
            color: None,
            alpha: 1.0,
            style: LineStyle::Solid,
        });
        self
    }

    /// Add a line with an explicit color and opacity.
    pub fn colored_line(
        mut self,
        label: impl Into<String>,
        x: &[DateTime<Utc>],
        y: &[f64],
        color: &str,
        alpha: f64,
    ) -> Self {
        self.lines.push(Line {
            label: label.into(),
            x: x.to_vec(),
            y: y.to_vec(),
            color: Some(color.to_string()),
            alpha,
            style: LineStyle::Solid,
        });
        self
    }

    pub fn band(mut self, x: &[DateTime<Utc>], lower: &[f64], upper: &[f64]) -> Self {
        self.bands.push(Band {
            x: x.to_vec(),
            lower: lower.to_vec(),
            upper: upper.to_vec(),
            color: "b".to_string(),
            alpha: 0.1,
        });
        self
    }

    pub fn vertical_marker(mut self, at: DateTime<Utc>) -> Self {
        self.markers.push(VerticalMarker {
            at,
            color: "black".to_string(),
            style: LineStyle::Dotted,
        });
        self
    }

    pub fn stems(mut self, values: &[f64], significance: f64) -> Self {
        self.stems = Some(Stems {
            lags: (0..values.len()).collect(),
            values: values.to_vec(),
            significance,
        });
        self
    }
}
