//! CSV Data Loader Module
//! Reads the input CSV into a Polars DataFrame.

use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rows scanned when inferring column types.
const SCHEMA_INFER_ROWS: usize = 10_000;

/// Cell texts read as missing, in addition to empty fields.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File '{}' not found!", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Loads CSV files with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row.
    ///
    /// Empty fields and [`MISSING_MARKERS`] become nulls, so a numeric
    /// column with `NA` cells still loads as numeric. Column types are
    /// inferred from the first rows of the file.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.is_file() {
            return Err(LoaderError::FileNotFound(path.to_path_buf()));
        }

        info!("Loading CSV from {}", path.display());
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(SCHEMA_INFER_ROWS))
            .with_null_values(Some(NullValues::AllColumns(
                MISSING_MARKERS.iter().map(|m| (*m).into()).collect(),
            )))
            .finish()?
            .collect()?;

        debug!("Loaded frame with shape {:?}", df.shape());
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_is_reported() {
        let err = DataLoader::load_csv(Path::new("definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, LoaderError::FileNotFound(_)));
        assert_eq!(
            err.to_string(),
            "File 'definitely/not/here.csv' not found!"
        );
    }

    #[test]
    fn loads_header_and_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,label\n1,a\n2,\n3,c").unwrap();

        let df = DataLoader::load_csv(file.path()).unwrap();
        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.column("label").unwrap().null_count(), 1);
    }

    #[test]
    fn missing_markers_keep_columns_numeric() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x,y,z\n1,2,a\nNA,3,b\n4,N/A,c\n5,6,null\n7,8.5,d").unwrap();

        let df = DataLoader::load_csv(file.path()).unwrap();
        assert!(df.column("x").unwrap().dtype().is_integer());
        assert!(df.column("y").unwrap().dtype().is_float());
        assert_eq!(df.column("x").unwrap().null_count(), 1);
        assert_eq!(df.column("y").unwrap().null_count(), 1);
        assert_eq!(df.column("z").unwrap().null_count(), 1);

        let ds = crate::data::DataProcessor::preprocess(df).unwrap();
        assert_eq!(ds.height(), 2);
        assert_eq!(ds.row_index(), &[0, 4]);
        assert_eq!(ds.numeric_columns(), vec!["x", "y"]);
    }

    #[test]
    fn ragged_rows_are_a_csv_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "a,b\n1,2\n3,4,5,6").unwrap();

        let err = DataLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::Csv(_)));
    }
}
