use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Date32Type, Float64Type};
use arrow::temporal_conversions::date32_to_datetime;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::LoadError;
use super::model::{Column, TimeSeriesTable};

/// Name of the key column every input file must carry.
pub const DATE_COLUMN: &str = "Date";

/// Header pandas writes for a DataFrame index it was not told to drop.
const PANDAS_INDEX_COLUMN: &str = "__index_level_0__";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a date-keyed table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, a `Date` column, numeric value columns
/// * `.parquet` – a `Date` column (date, timestamp or string) plus numeric columns
///
/// The table is named after the file stem.
pub fn load(path: &Path) -> Result<TimeSeriesTable, LoadError> {
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: other.to_string(),
            })
        }
    };

    log::info!(
        "Loaded '{}' from {}: {} rows, columns {:?}",
        table.name(),
        path.display(),
        table.len(),
        table.column_names().collect::<Vec<_>>()
    );
    if table.has_duplicate_dates() {
        log::warn!(
            "'{}' contains duplicate dates; all rows are kept in file order",
            table.name()
        );
    }
    Ok(table)
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string()
}

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse an ISO-style date or date-time string into a calendar date.
/// Any time-of-day component is discarded.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Tokens treated as a missing value, as a dataframe reader would.
fn is_missing(s: &str) -> bool {
    matches!(
        s,
        "" | "NaN" | "nan" | "NA" | "N/A" | "null" | "NULL" | "None" | "<NA>"
    )
}

/// `Ok(None)` for a missing cell, `Err(())` for text that is not a number.
fn parse_number(s: &str) -> Result<Option<f64>, ()> {
    let s = s.trim();
    if is_missing(s) {
        return Ok(None);
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one of which is `Date`.
/// Every other named column must hold numbers or missing-value tokens.
/// Columns with an empty header (a written-out dataframe index) are skipped.
fn load_csv(path: &Path) -> Result<TimeSeriesTable, LoadError> {
    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| h == DATE_COLUMN)
        .ok_or_else(|| LoadError::MissingDateColumn {
            path: path.to_path_buf(),
        })?;

    let value_cols: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(i, h)| *i != date_idx && !h.is_empty())
        .map(|(i, h)| (i, h.as_str()))
        .collect();

    let mut dates = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); value_cols.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(csv_err)?;
        let row = row_no + 1;

        let raw_date = record.get(date_idx).unwrap_or("");
        let date = parse_date(raw_date).ok_or_else(|| LoadError::InvalidDate {
            path: path.to_path_buf(),
            row,
            value: raw_date.to_string(),
        })?;
        dates.push(date);

        for (slot, &(col_idx, col_name)) in value_cols.iter().enumerate() {
            let raw = record.get(col_idx).unwrap_or("");
            let value = parse_number(raw).map_err(|()| LoadError::InvalidNumber {
                path: path.to_path_buf(),
                row,
                column: col_name.to_string(),
                value: raw.to_string(),
            })?;
            values[slot].push(value);
        }
    }

    let columns = value_cols
        .iter()
        .zip(values)
        .map(|(&(_, name), vals)| Column::new(name, vals))
        .collect();

    Ok(TimeSeriesTable::new(table_name(path), dates, columns))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding a date-keyed table.
///
/// Expected schema:
/// - `Date`: Date32, Date64, Timestamp or Utf8
/// - any other column: numeric (cast to Float64) or Utf8 holding numbers
///
/// Works with files written by **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); a pandas index column is ignored.
fn load_parquet(path: &Path) -> Result<TimeSeriesTable, LoadError> {
    let parquet_err = |source: parquet::errors::ParquetError| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;
    let schema = builder.schema().clone();

    let date_idx = schema
        .index_of(DATE_COLUMN)
        .map_err(|_| LoadError::MissingDateColumn {
            path: path.to_path_buf(),
        })?;

    let value_cols: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(i, f)| {
            *i != date_idx && !f.name().is_empty() && f.name() != PANDAS_INDEX_COLUMN
        })
        .map(|(i, f)| (i, f.name().clone()))
        .collect();

    let reader = builder.build().map_err(parquet_err)?;

    let mut dates = Vec::new();
    let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); value_cols.len()];

    for batch_result in reader {
        let batch = batch_result.map_err(|source| LoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;
        let first_row = dates.len() + 1;

        append_dates(batch.column(date_idx), path, first_row, &mut dates)?;
        for (slot, (col_idx, col_name)) in value_cols.iter().enumerate() {
            append_values(batch.column(*col_idx), path, col_name, first_row, &mut values[slot])?;
        }
    }

    let columns = value_cols
        .into_iter()
        .zip(values)
        .map(|((_, name), vals)| Column::new(name, vals))
        .collect();

    Ok(TimeSeriesTable::new(table_name(path), dates, columns))
}

// -- Parquet / Arrow helpers --

fn arrow_err(path: &Path) -> impl Fn(arrow::error::ArrowError) -> LoadError + '_ {
    move |source| LoadError::Arrow {
        path: path.to_path_buf(),
        source,
    }
}

/// Append the dates of one batch. Strings go through [`parse_date`];
/// every other temporal type is cast to Date32 by arrow.
fn append_dates(
    col: &ArrayRef,
    path: &Path,
    first_row: usize,
    out: &mut Vec<NaiveDate>,
) -> Result<(), LoadError> {
    let invalid = |row: usize, value: &str| LoadError::InvalidDate {
        path: path.to_path_buf(),
        row,
        value: value.to_string(),
    };

    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast(col, &DataType::Utf8).map_err(arrow_err(path))?;
            for (i, v) in strings.as_string::<i32>().iter().enumerate() {
                let raw = v.unwrap_or("");
                out.push(parse_date(raw).ok_or_else(|| invalid(first_row + i, raw))?);
            }
        }
        _ => {
            let days = cast(col, &DataType::Date32).map_err(arrow_err(path))?;
            for (i, v) in days.as_primitive::<Date32Type>().iter().enumerate() {
                let date = v
                    .and_then(date32_to_datetime)
                    .map(|dt| dt.date())
                    .ok_or_else(|| invalid(first_row + i, "<null>"))?;
                out.push(date);
            }
        }
    }
    Ok(())
}

/// Append one batch of a value column as `Option<f64>`; nulls and NaN are missing.
fn append_values(
    col: &ArrayRef,
    path: &Path,
    column: &str,
    first_row: usize,
    out: &mut Vec<Option<f64>>,
) -> Result<(), LoadError> {
    match col.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let strings = cast(col, &DataType::Utf8).map_err(arrow_err(path))?;
            for (i, v) in strings.as_string::<i32>().iter().enumerate() {
                let raw = v.unwrap_or("");
                let value = parse_number(raw).map_err(|()| LoadError::InvalidNumber {
                    path: path.to_path_buf(),
                    row: first_row + i,
                    column: column.to_string(),
                    value: raw.to_string(),
                })?;
                out.push(value);
            }
        }
        dt if dt.is_numeric() || *dt == DataType::Null => {
            let floats = cast(col, &DataType::Float64).map_err(arrow_err(path))?;
            let floats = floats.as_primitive::<Float64Type>();
            out.extend(floats.iter().map(|v| v.filter(|x| !x.is_nan())));
        }
        other => {
            return Err(LoadError::InvalidNumber {
                path: path.to_path_buf(),
                row: first_row,
                column: column.to_string(),
                value: format!("<{other} column>"),
            })
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{
        Date32Array, Float64Array, Int64Array, StringArray, TimestampMillisecondArray,
        TimestampSecondArray,
    };
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::{tempdir, TempDir};

    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn parses_common_date_shapes() {
        assert_eq!(parse_date("2020-03-31"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("2020/03/31"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("2020-03-31 00:00:00"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("2020-03-31 23:59:59.250"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("2020-03-31T12:30:00"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("2020-03-31 12:30"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("2020-03-31T22:00:00+13:00"), Some(d(2020, 3, 31)));
        assert_eq!(parse_date(" 2020-03-31 "), Some(d(2020, 3, 31)));
        assert_eq!(parse_date("31 March"), None);
        assert_eq!(parse_date("2020-02-30"), None);
    }

    #[test]
    fn loads_csv_with_date_key() {
        let dir = tempdir().unwrap();
        let path = write_file(
            &dir,
            "historic_output.csv",
            "Date,OCR,CPI\n2020-03-31,0.25,1.1\n2020-06-30 00:00:00,0.25,\n2020-09-30,0.25,NaN\n",
        );

        let t = load(&path).unwrap();
        assert_eq!(t.name(), "historic_output");
        assert_eq!(t.dates(), &[d(2020, 3, 31), d(2020, 6, 30), d(2020, 9, 30)]);
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec!["OCR", "CPI"]);
        assert_eq!(t.column("CPI").unwrap().values, vec![Some(1.1), None, None]);
    }

    #[test]
    fn date_column_need_not_be_first() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "OCR,Date\n1.5,2021-01-01\n");
        let t = load(&path).unwrap();
        assert_eq!(t.dates(), &[d(2021, 1, 1)]);
        assert_eq!(t.column("OCR").unwrap().values, vec![Some(1.5)]);
    }

    #[test]
    fn skips_unnamed_index_column() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", ",Date,OCR\n0,2021-01-01,1.5\n1,2021-04-01,1.75\n");
        let t = load(&path).unwrap();
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec!["OCR"]);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn header_only_csv_is_an_empty_table() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "Date,OCR\n");
        let t = load(&path).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.column_names().collect::<Vec<_>>(), vec!["OCR"]);
    }

    #[test]
    fn missing_date_column_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "Quarter,OCR\n2020Q1,0.25\n");
        assert!(matches!(
            load(&path),
            Err(LoadError::MissingDateColumn { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("predictions_base.csv");
        assert!(matches!(load(&path), Err(LoadError::NotFound(p)) if p == path));
    }

    #[test]
    fn bad_date_reports_row() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "Date,OCR\n2020-01-01,1\nsoon,2\n");
        match load(&path) {
            Err(LoadError::InvalidDate { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "soon");
            }
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_cell_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "Date,OCR\n2020-01-01,high\n");
        match load(&path) {
            Err(LoadError::InvalidNumber { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "OCR");
                assert_eq!(value, "high");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn ragged_csv_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.csv", "Date,OCR\n2020-01-01,1,2\n");
        assert!(matches!(load(&path), Err(LoadError::Csv { .. })));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_file(&dir, "t.xlsx", "");
        assert!(matches!(
            load(&path),
            Err(LoadError::UnsupportedFormat { extension, .. }) if extension == "xlsx"
        ));
    }

    /// Write one batch to `name` under `dir`; every field is nullable.
    fn write_parquet(dir: &TempDir, name: &str, columns: Vec<(&str, ArrayRef)>) -> PathBuf {
        let path = dir.path().join(name);
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let arrays = columns.into_iter().map(|(_, array)| array).collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();

        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        path
    }

    #[test]
    fn loads_parquet_with_date32_key() {
        let dir = tempdir().unwrap();
        // 18262 = 2020-01-01
        let path = write_parquet(
            &dir,
            "predictions_base.parquet",
            vec![
                ("Date", Arc::new(Date32Array::from(vec![18262, 18353])) as ArrayRef),
                ("Random Forest", Arc::new(Float64Array::from(vec![Some(0.25), None])) as ArrayRef),
                ("horizon", Arc::new(Int64Array::from(vec![1, 2])) as ArrayRef),
            ],
        );

        let t = load(&path).unwrap();
        assert_eq!(t.dates(), &[d(2020, 1, 1), d(2020, 4, 1)]);
        assert_eq!(t.column("Random Forest").unwrap().values, vec![Some(0.25), None]);
        assert_eq!(t.column("horizon").unwrap().values, vec![Some(1.0), Some(2.0)]);
    }

    #[test]
    fn parquet_timestamp_in_named_zone_uses_local_date() {
        let dir = tempdir().unwrap();
        // 2020-03-31 12:00 UTC is 2020-04-01 01:00 in Auckland (NZDT, +13:00).
        let dates =
            TimestampSecondArray::from(vec![1_585_656_000]).with_timezone("Pacific/Auckland");
        let path = write_parquet(
            &dir,
            "historic_output.parquet",
            vec![
                ("Date", Arc::new(dates) as ArrayRef),
                ("OCR", Arc::new(Float64Array::from(vec![0.25])) as ArrayRef),
            ],
        );

        let t = load(&path).unwrap();
        assert_eq!(t.dates(), &[d(2020, 4, 1)]);
    }

    #[test]
    fn parquet_timestamp_without_zone_drops_time_of_day() {
        let dir = tempdir().unwrap();
        // 2020-06-30 23:00:00
        let dates = TimestampMillisecondArray::from(vec![1_593_558_000_000]);
        let path = write_parquet(
            &dir,
            "historic_output.parquet",
            vec![
                ("Date", Arc::new(dates) as ArrayRef),
                ("OCR", Arc::new(Float64Array::from(vec![0.25])) as ArrayRef),
            ],
        );

        let t = load(&path).unwrap();
        assert_eq!(t.dates(), &[d(2020, 6, 30)]);
    }

    #[test]
    fn parquet_string_columns_are_parsed_like_csv() {
        let dir = tempdir().unwrap();
        let path = write_parquet(
            &dir,
            "predictions_sticky.parquet",
            vec![
                (
                    "Date",
                    Arc::new(StringArray::from(vec![
                        "2020-03-31 00:00:00",
                        "2020-06-30T12:00:00",
                    ])) as ArrayRef,
                ),
                ("SVR", Arc::new(StringArray::from(vec![Some("1.5"), Some("NaN")])) as ArrayRef),
                ("KNN", Arc::new(StringArray::from(vec![None, Some("2")])) as ArrayRef),
            ],
        );

        let t = load(&path).unwrap();
        assert_eq!(t.dates(), &[d(2020, 3, 31), d(2020, 6, 30)]);
        assert_eq!(t.column("SVR").unwrap().values, vec![Some(1.5), None]);
        assert_eq!(t.column("KNN").unwrap().values, vec![None, Some(2.0)]);
    }

    #[test]
    fn parquet_string_number_that_is_not_numeric_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write_parquet(
            &dir,
            "t.parquet",
            vec![
                ("Date", Arc::new(Date32Array::from(vec![18262])) as ArrayRef),
                ("SVR", Arc::new(StringArray::from(vec!["high"])) as ArrayRef),
            ],
        );

        match load(&path) {
            Err(LoadError::InvalidNumber { row, column, value, .. }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "SVR");
                assert_eq!(value, "high");
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
    }

    #[test]
    fn parquet_without_date_column_is_a_load_error() {
        let dir = tempdir().unwrap();
        let path = write_parquet(
            &dir,
            "t.parquet",
            vec![("OCR", Arc::new(Float64Array::from(vec![0.25])) as ArrayRef)],
        );
        assert!(matches!(
            load(&path),
            Err(LoadError::MissingDateColumn { .. })
        ));
    }

    #[test]
    fn parquet_null_date_reports_row() {
        let dir = tempdir().unwrap();
        let path = write_parquet(
            &dir,
            "t.parquet",
            vec![
                ("Date", Arc::new(Date32Array::from(vec![Some(18262), None])) as ArrayRef),
                ("OCR", Arc::new(Float64Array::from(vec![0.25, 0.5])) as ArrayRef),
            ],
        );

        match load(&path) {
            Err(LoadError::InvalidDate { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
    }
}
