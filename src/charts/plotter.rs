//! Chart Plotter Module
//! Builds chart descriptions for the analysis column and the corner plot.

use crate::charts::{BarData, BoxData, Chart, CornerData, HistogramData, ScatterData};
use crate::data::{ColumnValues, Dataset};
use crate::stats::{StatsCalculator, StatsError};
use log::debug;
use std::path::{Path, PathBuf};

/// Columns with fewer distinct values than this are drawn as bar charts.
pub const DISTINCT_VALUE_THRESHOLD: usize = 10;
/// Bins of the categorical-plot histogram.
pub const HISTOGRAM_BINS: usize = 10;
/// Bins of the corner-plot marginals.
pub const CORNER_BINS: usize = 20;

pub const RELATIONAL_SUFFIX: &str = "_relational_plot.png";
pub const CATEGORICAL_SUFFIX: &str = "_categorical_plot.png";
pub const STATISTICAL_SUFFIX: &str = "_statistical_plot.png";

const UNSAFE_FILENAME_CHARS: [char; 12] =
    [' ', '(', ')', '/', '\\', ':', ';', '<', '>', '?', '*', '|'];

/// Replace characters that break common filesystems with `_`.
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// How the categorical plot presents a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoricalKind {
    /// Value counts, one bar per distinct value.
    Bar,
    /// Equal-width histogram of the raw values.
    Histogram,
}

/// Creates chart descriptions from a cleaned dataset.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Output file for `column` with one of the plot suffixes.
    pub fn output_path(dir: &Path, column: &str, suffix: &str) -> PathBuf {
        dir.join(sanitize_filename(&format!("{column}{suffix}")))
    }

    /// Text columns and columns with few distinct values are categorical.
    pub fn categorical_kind(values: &ColumnValues) -> CategoricalKind {
        if !values.is_numeric() || values.distinct_count() < DISTINCT_VALUE_THRESHOLD {
            CategoricalKind::Bar
        } else {
            CategoricalKind::Histogram
        }
    }

    /// Scatter of the column against the original row index.
    pub fn relational(dataset: &Dataset, column: &str) -> Result<ScatterData, StatsError> {
        let (index, values) = dataset.indexed_column_values(column)?;

        let (ys, y_categories) = match values {
            ColumnValues::Numeric(values) => (values, None),
            ColumnValues::Text(values) => {
                let mut categories: Vec<String> = Vec::new();
                let ordinals: Vec<f64> = values
                    .iter()
                    .map(|v| {
                        let pos = categories.iter().position(|c| c == v).unwrap_or_else(|| {
                            categories.push(v.clone());
                            categories.len() - 1
                        });
                        pos as f64
                    })
                    .collect();
                (ordinals, Some(categories))
            }
        };

        Ok(ScatterData {
            title: format!("Relational Plot: {column}"),
            x_label: "Index".to_string(),
            y_label: column.to_string(),
            points: index.into_iter().map(|i| i as f64).zip(ys).collect(),
            y_categories,
        })
    }

    /// Bar chart of value counts, or a histogram for continuous columns.
    pub fn categorical(dataset: &Dataset, column: &str) -> Result<Chart, StatsError> {
        let float = dataset.frame().column(column)?.dtype().is_float();
        let values = dataset.column_values(column)?;
        let kind = Self::categorical_kind(&values);
        debug!(
            "Column '{}' has {} distinct values, drawing {:?}",
            column,
            values.distinct_count(),
            kind
        );

        let title = format!("Categorical/Histogram Plot: {column}");
        let x_label = column.to_string();
        let y_label = "Frequency".to_string();

        let chart = match (kind, values) {
            (CategoricalKind::Histogram, ColumnValues::Numeric(values)) => {
                Chart::Histogram(HistogramData {
                    title,
                    x_label,
                    y_label,
                    histogram: StatsCalculator::histogram(&values, HISTOGRAM_BINS),
                })
            }
            (_, values) => Chart::Bar(BarData {
                title,
                x_label,
                y_label,
                bars: StatsCalculator::value_counts(&Self::labels(values, float)),
            }),
        };
        Ok(chart)
    }

    /// Box plot of a numeric column.
    pub fn statistical(dataset: &Dataset, column: &str) -> Result<BoxData, StatsError> {
        match dataset.column_values(column)? {
            ColumnValues::Numeric(values) => Ok(BoxData {
                title: format!("Statistical Plot (Box Plot): {column}"),
                x_label: column.to_string(),
                stats: StatsCalculator::box_stats(&values),
            }),
            ColumnValues::Text(_) => Err(StatsError::NonNumeric(column.to_string())),
        }
    }

    /// Pairwise matrix of all numeric columns, `None` with fewer than two.
    pub fn corner(dataset: &Dataset) -> Result<Option<CornerData>, StatsError> {
        let labels = dataset.numeric_columns();
        if labels.len() < 2 {
            return Ok(None);
        }

        let rows = dataset.numeric_rows(&labels)?;
        let columns: Vec<Vec<f64>> = (0..labels.len())
            .map(|j| rows.iter().map(|row| row[j]).collect())
            .collect();
        let marginals = columns
            .iter()
            .map(|values| StatsCalculator::histogram(values, CORNER_BINS))
            .collect();
        let titles = labels
            .iter()
            .zip(&columns)
            .map(|(label, values)| Self::quantile_title(label, values))
            .collect();

        Ok(Some(CornerData {
            labels,
            columns,
            marginals,
            titles,
        }))
    }

    /// `label = median +(q84 - median) -(median - q16)`, two decimals.
    fn quantile_title(label: &str, values: &[f64]) -> String {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let q16 = StatsCalculator::percentile(&sorted, 16.0);
        let q50 = StatsCalculator::percentile(&sorted, 50.0);
        let q84 = StatsCalculator::percentile(&sorted, 84.0);
        format!("{label} = {q50:.2} +{:.2} -{:.2}", q84 - q50, q50 - q16)
    }

    /// Display labels used for value counting. Whole floats keep their `.0`
    /// so `2.0` in a float column is not shown as an integer.
    fn labels(values: ColumnValues, float: bool) -> Vec<String> {
        match values {
            ColumnValues::Text(values) => values,
            ColumnValues::Numeric(values) => values
                .iter()
                .map(|v| {
                    if float && v.is_finite() && v.fract() == 0.0 {
                        format!("{v:.1}")
                    } else {
                        v.to_string()
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn numeric(n: usize) -> ColumnValues {
        ColumnValues::Numeric((0..n).map(|i| i as f64).collect())
    }

    #[test]
    fn sanitize_replaces_every_unsafe_char() {
        assert_eq!(
            sanitize_filename("CO2 Emissions(g/km)_relational_plot.png"),
            "CO2_Emissions_g_km__relational_plot.png"
        );
        assert_eq!(sanitize_filename(r"a\b:c;d<e>f?g*h|i"), "a_b_c_d_e_f_g_h_i");
    }

    #[test]
    fn sanitize_is_idempotent() {
        for name in ["plain.png", "Fuel Consumption (L/100 km)", "x?*|<>"] {
            let once = sanitize_filename(name);
            assert_eq!(sanitize_filename(&once), once);
            assert!(!once.chars().any(|c| UNSAFE_FILENAME_CHARS.contains(&c)));
        }
    }

    #[test]
    fn output_path_joins_sanitized_name() {
        let path = ChartPlotter::output_path(Path::new("out"), "Engine Size(L)", STATISTICAL_SUFFIX);
        assert_eq!(path, Path::new("out").join("Engine_Size_L__statistical_plot.png"));
    }

    #[test]
    fn threshold_between_bar_and_histogram() {
        assert_eq!(ChartPlotter::categorical_kind(&numeric(9)), CategoricalKind::Bar);
        assert_eq!(ChartPlotter::categorical_kind(&numeric(10)), CategoricalKind::Histogram);
        assert_eq!(ChartPlotter::categorical_kind(&numeric(12)), CategoricalKind::Histogram);
    }

    #[test]
    fn text_columns_are_always_bars() {
        let few = ColumnValues::Text(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(ChartPlotter::categorical_kind(&few), CategoricalKind::Bar);
        let many = ColumnValues::Text((0..15).map(|i| format!("v{i}")).collect());
        assert_eq!(ChartPlotter::categorical_kind(&many), CategoricalKind::Bar);
    }

    #[test]
    fn categorical_builds_sorted_bars() {
        let ds = Dataset::from_frame(df!("Fuel" => ["Z", "X", "X", "D", "X", "Z"]).unwrap());
        match ChartPlotter::categorical(&ds, "Fuel").unwrap() {
            Chart::Bar(bar) => {
                assert_eq!(
                    bar.bars,
                    vec![("X".to_string(), 3), ("Z".to_string(), 2), ("D".to_string(), 1)]
                );
                assert_eq!(bar.y_label, "Frequency");
            }
            other => panic!("expected bar chart, got {:?}", other.title()),
        }
    }

    #[test]
    fn bar_labels_follow_column_dtype() {
        let ds = Dataset::from_frame(
            df!("Size" => [2.0, 2.0, 3.5, 4.0], "Gears" => [5i64, 5, 6, 6]).unwrap(),
        );
        let bars = |column: &str| match ChartPlotter::categorical(&ds, column).unwrap() {
            Chart::Bar(bar) => bar.bars,
            other => panic!("expected bar chart, got {:?}", other.title()),
        };
        assert_eq!(
            bars("Size"),
            vec![("2.0".to_string(), 2), ("3.5".to_string(), 1), ("4.0".to_string(), 1)]
        );
        assert_eq!(bars("Gears"), vec![("5".to_string(), 2), ("6".to_string(), 2)]);
    }

    #[test]
    fn relational_uses_source_row_index() {
        let ds = Dataset::new(df!("v" => [5.0, 6.0]).unwrap(), vec![2, 7]);
        let scatter = ChartPlotter::relational(&ds, "v").unwrap();
        assert_eq!(scatter.points, vec![(2.0, 5.0), (7.0, 6.0)]);
        assert_eq!(scatter.title, "Relational Plot: v");
        assert!(scatter.y_categories.is_none());
    }

    #[test]
    fn statistical_rejects_text() {
        let ds = Dataset::from_frame(df!("t" => ["a", "b"]).unwrap());
        assert!(matches!(
            ChartPlotter::statistical(&ds, "t"),
            Err(StatsError::NonNumeric(_))
        ));
    }

    #[test]
    fn corner_needs_two_numeric_columns() {
        let one = Dataset::from_frame(df!("a" => [1.0, 2.0], "t" => ["x", "y"]).unwrap());
        assert!(ChartPlotter::corner(&one).unwrap().is_none());

        let two = Dataset::from_frame(
            df!("a" => [1.0, 2.0, 3.0], "b" => [3i64, 2, 1], "t" => ["x", "y", "z"]).unwrap(),
        );
        let corner = ChartPlotter::corner(&two).unwrap().unwrap();
        assert_eq!(corner.labels, vec!["a", "b"]);
        assert_eq!(corner.columns[1], vec![3.0, 2.0, 1.0]);
        assert_eq!(corner.marginals[0].counts.len(), CORNER_BINS);
        assert_eq!(corner.titles[0], "a = 2.00 +0.68 -0.68");
    }
}
