use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an input file into a [`TimeSeriesTable`](super::model::TimeSeriesTable).
///
/// Load errors are fatal at startup; there is no partial dashboard.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed parquet in {path}: {source}")]
    Parquet {
        path: PathBuf,
        #[source]
        source: parquet::errors::ParquetError,
    },

    #[error("reading arrow data from {path}: {source}")]
    Arrow {
        path: PathBuf,
        #[source]
        source: arrow::error::ArrowError,
    },

    #[error("{path} has no 'Date' column")]
    MissingDateColumn { path: PathBuf },

    #[error("{path}, row {row}: cannot parse date '{value}'")]
    InvalidDate {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("{path}, row {row}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("unsupported file extension '.{extension}' for {path}")]
    UnsupportedFormat { path: PathBuf, extension: String },
}

/// A query named a column the table does not have.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("column '{column}' not found in table '{table}'")]
pub struct ColumnNotFoundError {
    pub table: String,
    pub column: String,
}
