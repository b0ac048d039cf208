/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .parquet  (Date + numeric columns)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TimeSeriesTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ DashboardData  │  historic + three forecast scenarios, immutable
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  date range → rows, selection → columns, column → series
///   └──────────┘
/// ```

pub mod dataset;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
