//! Write a synthetic `data/` directory the dashboard can open.
//!
//! Usage: `generate_sample [out_dir] [--parquet]`
//!
//! Produces quarterly historic indicators plus model forecasts for the
//! baseline, sticky-inflation and downturn scenarios. With `--parquet`
//! each CSV also gets a `.parquet` twin with a Date32 `Date` column.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Date32Array, Float64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use parquet::arrow::ArrowWriter;

const INDICATORS: [&str; 7] = [
    "OCR",
    "CPI",
    "GDP growth",
    "Unemployment rate",
    "HPI",
    "Government spending",
    "Consumption",
];

const MODELS: [&str; 5] = [
    "Linear Regression",
    "Decision Tree",
    "Random Forest",
    "KNN",
    "SVR",
];

const HISTORIC_QUARTERS: usize = 96;
const FORECAST_QUARTERS: usize = 12;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// In-memory table: dates plus named columns, written as CSV and Parquet.
struct SampleTable {
    dates: Vec<NaiveDate>,
    columns: Vec<(String, Vec<f64>)>,
}

/// Last day of the quarter `q` quarters after Q1 of `first_year`.
fn quarter_end(first_year: i32, q: usize) -> NaiveDate {
    let year = first_year + (q / 4) as i32;
    let (month, day) = [(3, 31), (6, 30), (9, 30), (12, 31)][q % 4];
    NaiveDate::from_ymd_opt(year, month, day).expect("quarter end is a valid date")
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn historic(rng: &mut SimpleRng) -> SampleTable {
    let dates: Vec<NaiveDate> = (0..HISTORIC_QUARTERS).map(|q| quarter_end(2000, q)).collect();
    // (start, drift, volatility, floor)
    let shapes = [
        (5.75, 0.0, 0.25, 0.25),
        (2.0, 0.0, 0.4, -0.5),
        (0.8, 0.0, 0.6, -3.0),
        (6.0, -0.01, 0.2, 3.0),
        (1000.0, 25.0, 20.0, 800.0),
        (9000.0, 180.0, 120.0, 8000.0),
        (22000.0, 300.0, 250.0, 20000.0),
    ];

    let columns = INDICATORS
        .iter()
        .zip(shapes)
        .map(|(name, (start, drift, vol, floor))| {
            let mut level: f64 = start;
            let values = (0..dates.len())
                .map(|_| {
                    level = (level + rng.gauss(drift, vol)).max(floor);
                    round2(level)
                })
                .collect();
            (name.to_string(), values)
        })
        .collect();

    SampleTable { dates, columns }
}

/// Forecast paths for each model: move from `start_ocr` toward `target`,
/// holding at `hold` for the first `hold_quarters` quarters.
fn forecast(
    rng: &mut SimpleRng,
    start_ocr: f64,
    hold: Option<(f64, usize)>,
    target: f64,
) -> SampleTable {
    let dates: Vec<NaiveDate> = (0..FORECAST_QUARTERS).map(|q| quarter_end(2024, q)).collect();

    let columns = MODELS
        .iter()
        .enumerate()
        .map(|(m, name)| {
            let bias = (m as f64 - 2.0) * 0.1;
            let mut level = start_ocr;
            let values = (0..FORECAST_QUARTERS)
                .map(|q| {
                    match hold {
                        Some((rate, quarters)) if q < quarters => level = rate,
                        _ => level += (target + bias - level) * 0.3,
                    }
                    round2((level + rng.gauss(0.0, 0.05)).max(0.0))
                })
                .collect();
            (name.to_string(), values)
        })
        .collect();

    SampleTable { dates, columns }
}

fn write_csv(table: &SampleTable, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["Date".to_string()];
    header.extend(table.columns.iter().map(|(name, _)| name.clone()));
    writer.write_record(&header)?;

    for (row, date) in table.dates.iter().enumerate() {
        let mut record = vec![date.to_string()];
        record.extend(table.columns.iter().map(|(_, values)| values[row].to_string()));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(table: &SampleTable, path: &Path) -> Result<()> {
    let mut fields = vec![Field::new("Date", DataType::Date32, false)];
    fields.extend(
        table
            .columns
            .iter()
            .map(|(name, _)| Field::new(name.as_str(), DataType::Float64, true)),
    );
    let schema = Arc::new(Schema::new(fields));

    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).expect("epoch is a valid date");
    let days: Vec<i32> = table
        .dates
        .iter()
        .map(|d| d.num_days_from_ce() - epoch.num_days_from_ce())
        .collect();

    let mut arrays: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(days))];
    arrays.extend(
        table
            .columns
            .iter()
            .map(|(_, values)| Arc::new(Float64Array::from(values.clone())) as ArrayRef),
    );

    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;
    let file = std::fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut out_dir = PathBuf::from("data");
    let mut parquet = false;
    for arg in std::env::args().skip(1) {
        if arg == "--parquet" {
            parquet = true;
        } else {
            out_dir = PathBuf::from(arg);
        }
    }
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let historic = historic(&mut rng);
    let last_ocr = historic.columns[0].1.last().copied().unwrap_or(5.5);

    let tables = [
        ("historic_output", historic),
        ("predictions_base", forecast(&mut rng, last_ocr, None, 3.5)),
        (
            "predictions_sticky",
            forecast(&mut rng, last_ocr, Some((last_ocr + 0.5, 6)), 4.0),
        ),
        ("predictions_downturn", forecast(&mut rng, last_ocr, None, 2.25)),
    ];

    for (stem, table) in &tables {
        let csv_path = out_dir.join(format!("{stem}.csv"));
        write_csv(table, &csv_path)?;
        println!("Wrote {} rows to {}", table.dates.len(), csv_path.display());

        if parquet {
            let pq_path = out_dir.join(format!("{stem}.parquet"));
            write_parquet(table, &pq_path)?;
            println!("Wrote {} rows to {}", table.dates.len(), pq_path.display());
        }
    }
    Ok(())
}
