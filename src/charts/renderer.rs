//! Static Chart Renderer
//! Draws charts with plotters into an RGB buffer and encodes them as PNG.
//!
//! Layout of every single-column chart: caption on top, value axis labelled
//! with the column name, 800x600 pixels. The corner plot is an N x N grid of
//! square cells; only the lower triangle and the diagonal are drawn.

use crate::charts::{
    BarData, BoxData, Chart, ChartError, ChartRenderer, CornerData, HistogramData, ScatterData,
};
use crate::gui::CornerViewer;
use image::RgbImage;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::ops::Range;
use std::path::Path;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 600;
const CORNER_CELL: u32 = 260;
const CORNER_MAX_SIZE: u32 = 2600;

const SCATTER_COLOR: RGBColor = BLUE;
const BAR_COLOR: RGBColor = RGBColor(0, 128, 0);
const BOX_COLOR: RGBColor = RGBColor(255, 165, 0);
const CORNER_COLOR: RGBColor = RGBColor(52, 73, 94);

const FONT: &str = "sans-serif";

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;
type DrawResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Renders charts to PNG files and shows the corner plot in a window.
#[derive(Default)]
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a chart into an in-memory image.
    pub fn render(chart: &Chart) -> Result<RgbImage, ChartError> {
        let (width, height) = Self::image_size(chart);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            let drawn = match chart {
                Chart::Scatter(data) => Self::draw_scatter(&root, data),
                Chart::Bar(data) => Self::draw_bars(&root, data),
                Chart::Histogram(data) => Self::draw_histogram(&root, data),
                Chart::Box(data) => Self::draw_box(&root, data),
                Chart::Corner(data) => Self::draw_corner(&root, data),
            };
            drawn
                .and_then(|_| root.present().map_err(Into::into))
                .map_err(|e| ChartError::Render(e.to_string()))?;
        }

        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| ChartError::Render("image buffer size mismatch".to_string()))
    }

    fn image_size(chart: &Chart) -> (u32, u32) {
        match chart {
            Chart::Corner(data) => {
                let side = (CORNER_CELL * data.labels.len() as u32).clamp(CHART_HEIGHT, CORNER_MAX_SIZE);
                (side, side)
            }
            _ => (CHART_WIDTH, CHART_HEIGHT),
        }
    }

    fn draw_scatter(root: &Area, data: &ScatterData) -> DrawResult<()> {
        root.fill(&WHITE)?;
        let x_range = padded_range(data.points.iter().map(|p| p.0));
        let y_range = padded_range(data.points.iter().map(|p| p.1));

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_range, y_range)?;

        let categories = data.y_categories.clone();
        let y_formatter = move |y: &f64| match &categories {
            Some(names) => category_label(names, *y),
            None => format!("{y}"),
        };
        chart
            .configure_mesh()
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .y_label_formatter(&y_formatter)
            .draw()?;

        chart.draw_series(
            data.points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, SCATTER_COLOR.mix(0.7).filled())),
        )?;
        Ok(())
    }

    fn draw_bars(root: &Area, data: &BarData) -> DrawResult<()> {
        root.fill(&WHITE)?;
        let n = data.bars.len().max(1);
        let max_count = data.bars.iter().map(|b| b.1).max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..(max_count as f64 * 1.05))?;

        let names: Vec<String> = data.bars.iter().map(|b| b.0.clone()).collect();
        let x_formatter = move |x: &f64| category_label(&names, *x);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n)
            .x_label_formatter(&x_formatter)
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()?;

        chart.draw_series(data.bars.iter().enumerate().map(|(i, (_, count))| {
            let x = i as f64;
            Rectangle::new([(x - 0.4, 0.0), (x + 0.4, *count as f64)], BAR_COLOR.filled())
        }))?;
        Ok(())
    }

    fn draw_histogram(root: &Area, data: &HistogramData) -> DrawResult<()> {
        root.fill(&WHITE)?;
        let edges = &data.histogram.edges;
        let counts = &data.histogram.counts;
        let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
        let x_range = edges[0]..edges[edges.len() - 1];

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, 0f64..(max_count as f64 * 1.05))?;

        chart
            .configure_mesh()
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()?;

        let bins = || {
            edges
                .windows(2)
                .zip(counts)
                .map(|(edge, &count)| [(edge[0], 0.0), (edge[1], count as f64)])
        };
        chart.draw_series(bins().map(|r| Rectangle::new(r, BAR_COLOR.mix(0.7).filled())))?;
        chart.draw_series(bins().map(|r| Rectangle::new(r, BLACK.stroke_width(1))))?;
        Ok(())
    }

    fn draw_box(root: &Area, data: &BoxData) -> DrawResult<()> {
        root.fill(&WHITE)?;
        let s = &data.stats;
        let x_range = padded_range(
            [s.whisker_low, s.whisker_high, s.q1, s.q3]
                .into_iter()
                .chain(s.outliers.iter().copied()),
        );

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(20)
            .build_cartesian_2d(x_range, -1f64..1f64)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_desc(data.x_label.as_str())
            .draw()?;

        let half = 0.4;
        let cap = 0.2;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(s.q1, -half), (s.q3, half)],
            BOX_COLOR.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(s.q1, -half), (s.q3, half)],
            BLACK.stroke_width(1),
        )))?;

        let segments = [
            vec![(s.median, -half), (s.median, half)],
            vec![(s.whisker_low, 0.0), (s.q1, 0.0)],
            vec![(s.q3, 0.0), (s.whisker_high, 0.0)],
            vec![(s.whisker_low, -cap), (s.whisker_low, cap)],
            vec![(s.whisker_high, -cap), (s.whisker_high, cap)],
        ];
        chart.draw_series(
            segments
                .into_iter()
                .map(|points| PathElement::new(points, BLACK.stroke_width(2))),
        )?;

        chart.draw_series(
            s.outliers
                .iter()
                .map(|&v| Circle::new((v, 0.0), 4, BLACK.stroke_width(1))),
        )?;
        Ok(())
    }

    fn draw_corner(root: &Area, data: &CornerData) -> DrawResult<()> {
        root.fill(&WHITE)?;
        let n = data.labels.len();
        let cells = root.split_evenly((n, n));
        let blank = |_: &f64| String::new();

        for (idx, cell) in cells.iter().enumerate() {
            let (row, col) = (idx / n, idx % n);
            if col > row {
                continue;
            }

            let bottom = row == n - 1;
            let left = col == 0;
            let mut builder = ChartBuilder::on(cell);
            builder
                .margin(4)
                .x_label_area_size(if bottom { 40 } else { 4 })
                .y_label_area_size(if left { 50 } else { 4 });

            if row == col {
                let hist = &data.marginals[col];
                let max_count = hist.counts.iter().copied().max().unwrap_or(0).max(1);
                builder.caption(&data.titles[col], (FONT, 13));
                let mut chart = builder.build_cartesian_2d(
                    hist.edges[0]..hist.edges[hist.edges.len() - 1],
                    0f64..(max_count as f64 * 1.1),
                )?;

                let mut mesh = chart.configure_mesh();
                mesh.x_labels(4).y_labels(4);
                if bottom {
                    mesh.x_desc(data.labels[col].as_str());
                } else {
                    mesh.x_label_formatter(&blank);
                }
                if !left {
                    mesh.y_label_formatter(&blank);
                }
                mesh.draw()?;

                chart.draw_series(hist.edges.windows(2).zip(&hist.counts).map(
                    |(edge, &count)| {
                        Rectangle::new(
                            [(edge[0], 0.0), (edge[1], count as f64)],
                            CORNER_COLOR.stroke_width(1),
                        )
                    },
                ))?;
            } else {
                let xs = &data.columns[col];
                let ys = &data.columns[row];
                let mut chart = builder.build_cartesian_2d(
                    padded_range(xs.iter().copied()),
                    padded_range(ys.iter().copied()),
                )?;

                let mut mesh = chart.configure_mesh();
                mesh.x_labels(4).y_labels(4);
                if bottom {
                    mesh.x_desc(data.labels[col].as_str());
                } else {
                    mesh.x_label_formatter(&blank);
                }
                if left {
                    mesh.y_desc(data.labels[row].as_str());
                } else {
                    mesh.y_label_formatter(&blank);
                }
                mesh.draw()?;

                chart.draw_series(
                    xs.iter()
                        .zip(ys)
                        .map(|(&x, &y)| Circle::new((x, y), 2, CORNER_COLOR.mix(0.6).filled())),
                )?;
            }
        }
        Ok(())
    }
}

impl ChartRenderer for StaticChartRenderer {
    fn save(&mut self, chart: &Chart, path: &Path) -> Result<(), ChartError> {
        let image = Self::render(chart)?;
        image.save(path)?;
        info!("Saved '{}' to {}", chart.title(), path.display());
        Ok(())
    }

    fn show(&mut self, corner: &CornerData) -> Result<(), ChartError> {
        CornerViewer::run(corner.clone())
    }
}

/// Data range with 5% padding; degenerate ranges are widened to a unit span.
fn padded_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    if lo == hi {
        return (lo - 0.5)..(hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad)..(hi + pad)
}

/// Tick label for an integer position into `names`; blank between positions.
fn category_label(names: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartPlotter;
    use crate::data::Dataset;
    use polars::df;

    fn dataset() -> Dataset {
        Dataset::from_frame(
            df!(
                "Engine Size(L)" => (0..12).map(|i| 1.0 + i as f64 * 0.5).collect::<Vec<_>>(),
                "Cylinders" => [4i64, 4, 6, 6, 6, 8, 8, 4, 6, 8, 12, 4],
                "Fuel" => ["X", "Z", "X", "D", "X", "Z", "X", "X", "E", "Z", "X", "D"],
                "Constant" => [3.0; 12],
            )
            .unwrap(),
        )
    }

    /// Save `chart` into `dir` and return the decoded size.
    fn save_and_measure(chart: &Chart, dir: &Path, name: &str) -> (u32, u32) {
        let path = dir.join(name);
        StaticChartRenderer::new().save(chart, &path).unwrap();
        let image = image::open(&path).unwrap();
        (image.width(), image.height())
    }

    #[test]
    fn column_charts_are_written_as_png() {
        let ds = dataset();
        let dir = tempfile::tempdir().unwrap();

        for column in ["Engine Size(L)", "Cylinders", "Fuel"] {
            let relational = Chart::Scatter(ChartPlotter::relational(&ds, column).unwrap());
            let categorical = ChartPlotter::categorical(&ds, column).unwrap();
            for (i, chart) in [relational, categorical].iter().enumerate() {
                let size = save_and_measure(chart, dir.path(), &format!("{i}_{column}.png"));
                assert_eq!(size, (CHART_WIDTH, CHART_HEIGHT));
            }
        }

        for column in ["Engine Size(L)", "Cylinders"] {
            let chart = Chart::Box(ChartPlotter::statistical(&ds, column).unwrap());
            let size = save_and_measure(&chart, dir.path(), &format!("box_{column}.png"));
            assert_eq!(size, (800, 600));
        }
    }

    #[test]
    fn constant_column_still_renders() {
        let ds = dataset();
        let dir = tempfile::tempdir().unwrap();

        let charts = [
            Chart::Scatter(ChartPlotter::relational(&ds, "Constant").unwrap()),
            ChartPlotter::categorical(&ds, "Constant").unwrap(),
            Chart::Box(ChartPlotter::statistical(&ds, "Constant").unwrap()),
        ];
        // one distinct value gives a single bar
        assert!(matches!(&charts[1], Chart::Bar(bar) if bar.bars.len() == 1));
        for (i, chart) in charts.iter().enumerate() {
            assert_eq!(
                save_and_measure(chart, dir.path(), &format!("constant_{i}.png")),
                (800, 600)
            );
        }
    }

    #[test]
    fn corner_grid_is_square() {
        let ds = dataset();
        let dir = tempfile::tempdir().unwrap();

        let corner = ChartPlotter::corner(&ds).unwrap().unwrap();
        assert_eq!(corner.labels.len(), 3);
        let size = save_and_measure(&Chart::Corner(corner), dir.path(), "corner.png");
        assert_eq!(size, (780, 780));
    }

    #[test]
    fn save_replaces_existing_file() {
        let ds = dataset();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        std::fs::write(&path, b"stale").unwrap();

        let chart = Chart::Box(ChartPlotter::statistical(&ds, "Cylinders").unwrap());
        StaticChartRenderer::new().save(&chart, &path).unwrap();
        assert!(image::open(&path).is_ok());
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range(std::iter::empty()), 0.0..1.0);
        assert_eq!(padded_range([2.0, 2.0].into_iter()), 1.5..2.5);
        let r = padded_range([0.0, 10.0, f64::NAN].into_iter());
        assert!((r.start + 0.5).abs() < 1e-9 && (r.end - 10.5).abs() < 1e-9);
    }

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let names = vec!["Z".to_string(), "X".to_string()];
        assert_eq!(category_label(&names, 1.0), "X");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, -1.0), "");
        assert_eq!(category_label(&names, 5.0), "");
    }

    #[test]
    fn corner_image_grows_with_columns() {
        let corner = |n: usize| {
            Chart::Corner(CornerData {
                labels: (0..n).map(|i| format!("c{i}")).collect(),
                columns: vec![Vec::new(); n],
                marginals: Vec::new(),
                titles: Vec::new(),
            })
        };
        assert_eq!(StaticChartRenderer::image_size(&corner(2)), (600, 600));
        assert_eq!(StaticChartRenderer::image_size(&corner(4)), (1040, 1040));
        assert_eq!(StaticChartRenderer::image_size(&corner(20)), (2600, 2600));
    }
}
