use std::collections::HashSet;
use std::fmt;
use std::iter::{Copied, Zip};
use std::slice;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Column – one named numeric column
// ---------------------------------------------------------------------------

/// A named numeric column. `None` marks a missing cell (empty, `NaN`, null).
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

// ---------------------------------------------------------------------------
// TimeSeriesTable – a date-keyed table
// ---------------------------------------------------------------------------

/// A table keyed by calendar date with one or more numeric columns.
///
/// Row order is the order of the source file. Dates are expected to be
/// unique and ascending but neither is enforced: duplicates are kept as
/// separate rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    name: String,
    dates: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl TimeSeriesTable {
    /// Assemble a table. Every column must have one value per date.
    pub fn new(name: impl Into<String>, dates: Vec<NaiveDate>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == dates.len()));
        Self {
            name: name.into(),
            dates,
            columns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The date key of every row, in row order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in table order (excludes `Date`).
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Earliest and latest date in the table, `None` when empty.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let start = self.dates.iter().min()?;
        let end = self.dates.iter().max()?;
        Some(DateRange::new(*start, *end))
    }

    pub fn has_duplicate_dates(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.dates.len());
        !self.dates.iter().all(|d| seen.insert(*d))
    }

    /// Keep only the rows whose index appears in `rows` (ascending).
    pub(crate) fn take_rows(&self, rows: &[usize]) -> Self {
        let dates = rows.iter().map(|&i| self.dates[i]).collect();
        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), rows.iter().map(|&i| c.values[i]).collect()))
            .collect();
        Self::new(self.name.clone(), dates, columns)
    }

    pub(crate) fn with_columns(&self, columns: Vec<Column>) -> Self {
        Self::new(self.name.clone(), self.dates.clone(), columns)
    }
}

// ---------------------------------------------------------------------------
// DateRange – a closed interval of calendar dates
// ---------------------------------------------------------------------------

/// Closed interval `[start, end]`. A range with `start > end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Pull both ends inside `bounds` and keep `start <= end`.
    pub fn clamp_to(&self, bounds: DateRange) -> DateRange {
        let clamp = |d: NaiveDate| d.max(bounds.start).min(bounds.end);
        let start = clamp(self.start);
        let end = clamp(self.end).max(start);
        DateRange::new(start, end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} – {}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Series – one column viewed as (date, value) pairs
// ---------------------------------------------------------------------------

pub type SeriesIter<'a> =
    Zip<Copied<slice::Iter<'a, NaiveDate>>, Copied<slice::Iter<'a, Option<f64>>>>;

/// A borrowed view of one column paired with the date key.
///
/// Iteration is lazy and in row order; the view is `Copy`, so it can be
/// walked as many times as needed.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    name: &'a str,
    dates: &'a [NaiveDate],
    values: &'a [Option<f64>],
}

impl<'a> Series<'a> {
    pub(crate) fn new(name: &'a str, dates: &'a [NaiveDate], values: &'a [Option<f64>]) -> Self {
        Self {
            name,
            dates,
            values,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn iter(&self) -> SeriesIter<'a> {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

impl<'a> IntoIterator for Series<'a> {
    type Item = (NaiveDate, Option<f64>);
    type IntoIter = SeriesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn table(dates: Vec<NaiveDate>) -> TimeSeriesTable {
        let values = (0..dates.len()).map(|i| Some(i as f64)).collect();
        TimeSeriesTable::new("t", dates, vec![Column::new("OCR", values)])
    }

    #[test]
    fn date_bounds_ignore_row_order() {
        let t = table(vec![d(2021, 3, 1), d(2020, 1, 1), d(2022, 6, 30)]);
        assert_eq!(
            t.date_bounds(),
            Some(DateRange::new(d(2020, 1, 1), d(2022, 6, 30)))
        );
    }

    #[test]
    fn empty_table_has_no_bounds() {
        assert_eq!(table(vec![]).date_bounds(), None);
    }

    #[test]
    fn detects_duplicate_dates() {
        assert!(!table(vec![d(2020, 1, 1), d(2020, 1, 2)]).has_duplicate_dates());
        assert!(table(vec![d(2020, 1, 1), d(2020, 1, 1)]).has_duplicate_dates());
    }

    #[test]
    fn range_is_inclusive() {
        let r = DateRange::new(d(2020, 3, 1), d(2020, 6, 30));
        assert!(r.contains(d(2020, 3, 1)));
        assert!(r.contains(d(2020, 6, 30)));
        assert!(!r.contains(d(2020, 2, 29)));
        assert!(!r.contains(d(2020, 7, 1)));
    }

    #[test]
    fn inverted_range_contains_nothing() {
        let r = DateRange::new(d(2020, 6, 30), d(2020, 3, 1));
        assert!(!r.contains(d(2020, 4, 1)));
    }

    #[test]
    fn clamp_pulls_range_into_bounds() {
        let bounds = DateRange::new(d(2020, 1, 1), d(2020, 12, 31));
        let r = DateRange::new(d(2019, 5, 1), d(2021, 5, 1)).clamp_to(bounds);
        assert_eq!(r, bounds);

        let inverted = DateRange::new(d(2020, 9, 1), d(2020, 2, 1)).clamp_to(bounds);
        assert_eq!(inverted, DateRange::new(d(2020, 9, 1), d(2020, 9, 1)));
    }

    #[test]
    fn series_can_be_walked_twice() {
        let t = table(vec![d(2020, 1, 1), d(2020, 4, 1)]);
        let col = t.column("OCR").unwrap();
        let s = Series::new(&col.name, t.dates(), &col.values);
        let first: Vec<_> = s.iter().collect();
        let second: Vec<_> = s.into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![(d(2020, 1, 1), Some(0.0)), (d(2020, 4, 1), Some(1.0))]);
    }
}
