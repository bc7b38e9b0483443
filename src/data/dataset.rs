//! Cleaned dataset and column extraction.

use polars::prelude::*;

/// Check whether a polars dtype is treated as numeric for analysis.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Values of a single column, split by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Numeric(Vec<f64>),
    Text(Vec<String>),
}

impl ColumnValues {
    pub fn len(&self) -> usize {
        match self {
            ColumnValues::Numeric(v) => v.len(),
            ColumnValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnValues::Numeric(_))
    }

    /// Number of distinct values. NaN compares equal to NaN here.
    pub fn distinct_count(&self) -> usize {
        match self {
            ColumnValues::Numeric(values) => {
                let mut sorted = values.clone();
                sorted.sort_by(|a, b| a.total_cmp(b));
                sorted.dedup_by(|a, b| a.total_cmp(b).is_eq());
                sorted.len()
            }
            ColumnValues::Text(values) => {
                let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                sorted.dedup();
                sorted.len()
            }
        }
    }
}

/// Table loaded from CSV after preprocessing.
///
/// `row_index` keeps the position each retained row had in the raw file,
/// so charts indexed by row stay aligned with the source data.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
    row_index: Vec<usize>,
}

impl Dataset {
    pub fn new(frame: DataFrame, row_index: Vec<usize>) -> Self {
        debug_assert_eq!(frame.height(), row_index.len());
        Self { frame, row_index }
    }

    /// Wrap a frame whose rows have not been filtered.
    pub fn from_frame(frame: DataFrame) -> Self {
        let row_index = (0..frame.height()).collect();
        Self { frame, row_index }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// Names of the integer and float columns, in frame order.
    pub fn numeric_columns(&self) -> Vec<String> {
        self.frame
            .get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.dtype()))
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Extract a column with missing values (null, NaN) dropped.
    pub fn column_values(&self, name: &str) -> PolarsResult<ColumnValues> {
        Ok(self.indexed_column_values(name)?.1)
    }

    /// Like [`Dataset::column_values`], also returning the original row
    /// index of every kept value.
    pub fn indexed_column_values(&self, name: &str) -> PolarsResult<(Vec<usize>, ColumnValues)> {
        let column = self.frame.column(name)?;
        if is_numeric_dtype(column.dtype()) {
            let values = column.cast(&DataType::Float64)?;
            let (index, values): (Vec<usize>, Vec<f64>) = self
                .row_index
                .iter()
                .copied()
                .zip(values.f64()?.into_iter())
                .filter_map(|(row, v)| v.filter(|v| !v.is_nan()).map(|v| (row, v)))
                .unzip();
            Ok((index, ColumnValues::Numeric(values)))
        } else {
            let values = column.cast(&DataType::String)?;
            let (index, values): (Vec<usize>, Vec<String>) = self
                .row_index
                .iter()
                .copied()
                .zip(values.as_materialized_series().str()?.into_iter())
                .filter_map(|(row, v)| v.map(|v| (row, v.to_string())))
                .unzip();
            Ok((index, ColumnValues::Text(values)))
        }
    }

    /// Rows of the numeric columns with no missing entry, as row-major vectors.
    pub fn numeric_rows(&self, names: &[String]) -> PolarsResult<Vec<Vec<f64>>> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let values = self.frame.column(name)?.cast(&DataType::Float64)?;
            let values: Vec<Option<f64>> = values.f64()?.into_iter().collect();
            columns.push(values);
        }

        let rows = (0..self.height())
            .filter_map(|row| {
                columns
                    .iter()
                    .map(|col| col[row].filter(|v| !v.is_nan()))
                    .collect::<Option<Vec<f64>>>()
            })
            .collect();
        Ok(rows)
    }
}
