//! Charts module - chart construction and rendering
//!
//! `plotter` turns dataset columns into backend-free chart descriptions;
//! a [`ChartRenderer`] writes them to disk or shows them on screen.

mod plotter;
mod renderer;

pub use plotter::{
    sanitize_filename, CategoricalKind, ChartPlotter, CATEGORICAL_SUFFIX, CORNER_BINS,
    DISTINCT_VALUE_THRESHOLD, HISTOGRAM_BINS, RELATIONAL_SUFFIX, STATISTICAL_SUFFIX,
};
pub use renderer::StaticChartRenderer;

use crate::stats::{BoxStats, Histogram};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to display chart: {0}")]
    Display(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Scatter of values against their source row index.
#[derive(Debug, Clone)]
pub struct ScatterData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
    /// Tick labels when y holds category ordinals.
    pub y_categories: Option<Vec<String>>,
}

/// Frequency bars, one per distinct value.
#[derive(Debug, Clone)]
pub struct BarData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, usize)>,
}

#[derive(Debug, Clone)]
pub struct HistogramData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: Histogram,
}

/// Horizontal box-and-whisker plot.
#[derive(Debug, Clone)]
pub struct BoxData {
    pub title: String,
    pub x_label: String,
    pub stats: BoxStats,
}

/// Pairwise matrix: marginal histograms on the diagonal, scatter below it.
#[derive(Debug, Clone)]
pub struct CornerData {
    pub labels: Vec<String>,
    /// Column-major values, every column the same length.
    pub columns: Vec<Vec<f64>>,
    /// One histogram per column for the diagonal cells.
    pub marginals: Vec<Histogram>,
    /// Diagonal titles, `label = median +upper -lower`.
    pub titles: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum Chart {
    Scatter(ScatterData),
    Bar(BarData),
    Histogram(HistogramData),
    Box(BoxData),
    Corner(CornerData),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Scatter(c) => &c.title,
            Chart::Bar(c) => &c.title,
            Chart::Histogram(c) => &c.title,
            Chart::Box(c) => &c.title,
            Chart::Corner(_) => "Corner Plot",
        }
    }
}

/// Output side of the pipeline: everything that draws pixels.
pub trait ChartRenderer {
    /// Render `chart` to an image file at `path`, replacing any existing file.
    fn save(&mut self, chart: &Chart, path: &Path) -> Result<(), ChartError>;

    /// Show the corner plot interactively; returns when the viewer closes.
    fn show(&mut self, corner: &CornerData) -> Result<(), ChartError>;
}
