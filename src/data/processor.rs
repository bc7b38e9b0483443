//! Data Processor Module
//! Cleans the raw frame and summarises it for the console overview.

use crate::data::dataset::{ColumnValues, Dataset};
use crate::stats::StatsCalculator;
use log::{debug, info};
use polars::prelude::*;
use rayon::prelude::*;
use std::fmt;
use thiserror::Error;

/// Rows shown in the "first few rows" preview.
pub const HEAD_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Console summary of a cleaned dataset.
pub struct Overview {
    pub describe: DataFrame,
    pub head: DataFrame,
    /// Pearson matrix of the numeric columns, `None` if there are none.
    pub correlation: Option<DataFrame>,
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data Overview:")?;
        writeln!(f, "{}\n", self.describe)?;
        writeln!(f, "First few rows:")?;
        writeln!(f, "{}\n", self.head)?;
        match &self.correlation {
            Some(corr) => {
                writeln!(f, "Correlation Matrix (numeric columns only):")?;
                writeln!(f, "{}\n", corr)
            }
            None => writeln!(f, "No numeric columns available for correlation analysis.\n"),
        }
    }
}

/// Handles data cleaning and overview statistics.
pub struct DataProcessor;

impl DataProcessor {
    /// Trim column names, then drop every row holding a missing value.
    ///
    /// Missing means null in any column or NaN in a float column.
    pub fn preprocess(df: DataFrame) -> Result<Dataset, ProcessorError> {
        let renamed: Vec<Column> = df
            .get_columns()
            .iter()
            .map(|col| {
                let trimmed = col.name().trim().to_string();
                col.clone().with_name(trimmed.into())
            })
            .collect();
        let df = DataFrame::new(renamed)?;

        let mut keep = vec![true; df.height()];
        for column in df.get_columns() {
            let present = column.is_not_null();
            for (slot, ok) in keep.iter_mut().zip(present.into_iter()) {
                *slot &= ok.unwrap_or(false);
            }

            if column.dtype().is_float() {
                let values = column.cast(&DataType::Float64)?;
                for (slot, v) in keep.iter_mut().zip(values.f64()?.into_iter()) {
                    *slot &= v.is_some_and(|v| !v.is_nan());
                }
            }
        }

        let row_index: Vec<usize> = keep
            .iter()
            .enumerate()
            .filter_map(|(i, &k)| k.then_some(i))
            .collect();
        let mask = BooleanChunked::from_slice("keep".into(), &keep);
        let cleaned = df.filter(&mask)?;

        info!(
            "Preprocessed dataset: kept {} of {} rows",
            cleaned.height(),
            keep.len()
        );
        Ok(Dataset::new(cleaned, row_index))
    }

    /// Build the describe table, the head preview and the correlation matrix.
    pub fn overview(dataset: &Dataset) -> Result<Overview, ProcessorError> {
        let numeric = dataset.numeric_columns();
        let describe = if numeric.is_empty() {
            Self::describe_text(dataset)?
        } else {
            Self::describe_numeric(dataset, &numeric)?
        };
        let head = dataset.frame().head(Some(HEAD_ROWS));
        let correlation = if numeric.is_empty() {
            None
        } else {
            Some(Self::correlation_frame(dataset, &numeric)?)
        };

        Ok(Overview {
            describe,
            head,
            correlation,
        })
    }

    /// count / mean / std / min / quartiles / max per numeric column.
    fn describe_numeric(dataset: &Dataset, numeric: &[String]) -> Result<DataFrame, ProcessorError> {
        let labels = ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];
        let values = Self::numeric_values(dataset, numeric)?;

        let summaries: Vec<Vec<f64>> = values
            .par_iter()
            .map(|v| {
                let s = StatsCalculator::compute_descriptive_stats(v);
                vec![
                    s.count as f64,
                    s.mean,
                    s.std,
                    s.min,
                    s.p25,
                    s.median,
                    s.p75,
                    s.max,
                ]
            })
            .collect();

        let mut columns = vec![Column::new("".into(), labels.to_vec())];
        for (name, summary) in numeric.iter().zip(summaries) {
            columns.push(Column::new(name.as_str().into(), summary));
        }
        Ok(DataFrame::new(columns)?)
    }

    /// count / unique / top / freq per text column.
    fn describe_text(dataset: &Dataset) -> Result<DataFrame, ProcessorError> {
        let labels = ["count", "unique", "top", "freq"];
        let mut columns = vec![Column::new("".into(), labels.to_vec())];

        for name in dataset.column_names() {
            let values = match dataset.column_values(&name)? {
                ColumnValues::Text(v) => v,
                ColumnValues::Numeric(_) => continue,
            };
            let counts = StatsCalculator::value_counts(&values);
            let (top, freq) = counts
                .first()
                .map(|(v, c)| (v.clone(), c.to_string()))
                .unwrap_or_default();
            let cells = vec![
                values.len().to_string(),
                counts.len().to_string(),
                top,
                freq,
            ];
            columns.push(Column::new(name.as_str().into(), cells));
        }
        Ok(DataFrame::new(columns)?)
    }

    fn correlation_frame(dataset: &Dataset, numeric: &[String]) -> Result<DataFrame, ProcessorError> {
        let values = Self::numeric_values(dataset, numeric)?;
        let matrix = StatsCalculator::correlation_matrix(&values);
        debug!("Correlation matrix over {} columns", numeric.len());

        let mut columns = vec![Column::new("".into(), numeric.to_vec())];
        for (j, name) in numeric.iter().enumerate() {
            let col: Vec<f64> = matrix.iter().map(|row| row[j]).collect();
            columns.push(Column::new(name.as_str().into(), col));
        }
        Ok(DataFrame::new(columns)?)
    }

    fn numeric_values(dataset: &Dataset, numeric: &[String]) -> Result<Vec<Vec<f64>>, ProcessorError> {
        numeric
            .iter()
            .map(|name| -> Result<Vec<f64>, ProcessorError> {
                match dataset.column_values(name)? {
                    ColumnValues::Numeric(v) => Ok(v),
                    ColumnValues::Text(_) => Ok(Vec::new()),
                }
            })
            .collect()
    }
}
