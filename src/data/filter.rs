use std::collections::HashSet;

use chrono::NaiveDate;

use super::error::ColumnNotFoundError;
use super::model::{Column, DateRange, Series, TimeSeriesTable};

// ---------------------------------------------------------------------------
// Row filter: closed date interval
// ---------------------------------------------------------------------------

/// Return the rows with `start <= date <= end`, in their original order.
///
/// A missing bound defaults to the table's own extent. No matching rows is
/// an empty table, not an error.
pub fn filter_by_date_range(
    table: &TimeSeriesTable,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> TimeSeriesTable {
    let Some(bounds) = table.date_bounds() else {
        return table.clone();
    };
    let range = DateRange::new(start.unwrap_or(bounds.start), end.unwrap_or(bounds.end));

    let rows: Vec<usize> = table
        .dates()
        .iter()
        .enumerate()
        .filter(|(_, d)| range.contains(**d))
        .map(|(i, _)| i)
        .collect();

    if rows.len() == table.len() {
        return table.clone();
    }
    table.take_rows(&rows)
}

/// [`filter_by_date_range`] with both bounds given.
pub fn filter_by_range(table: &TimeSeriesTable, range: DateRange) -> TimeSeriesTable {
    filter_by_date_range(table, Some(range.start), Some(range.end))
}

// ---------------------------------------------------------------------------
// Column projection
// ---------------------------------------------------------------------------

/// Project the table onto `names`, in the order given.
///
/// Repeated names are kept once (first position wins). Every name is checked
/// against the table's columns before anything is copied.
pub fn select_columns<S: AsRef<str>>(
    table: &TimeSeriesTable,
    names: &[S],
) -> Result<TimeSeriesTable, ColumnNotFoundError> {
    let mut seen = HashSet::new();
    let mut picked: Vec<&Column> = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        let column = table.column(name).ok_or_else(|| ColumnNotFoundError {
            table: table.name().to_string(),
            column: name.to_string(),
        })?;
        if seen.insert(name) {
            picked.push(column);
        }
    }

    Ok(table.with_columns(picked.into_iter().cloned().collect()))
}

// ---------------------------------------------------------------------------
// Series extraction
// ---------------------------------------------------------------------------

/// View one column as `(date, value)` pairs in row order.
pub fn series_for<'a>(
    table: &'a TimeSeriesTable,
    column: &str,
) -> Result<Series<'a>, ColumnNotFoundError> {
    let col = table.column(column).ok_or_else(|| ColumnNotFoundError {
        table: table.name().to_string(),
        column: column.to_string(),
    })?;
    Ok(Series::new(&col.name, table.dates(), &col.values))
}
