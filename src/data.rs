//! Data Loading and Management
//!
//! Loads the seasonal tourism table (CSV or Parquet snapshot) with Polars,
//! validates the schema, and extracts typed rows. The resulting
//! `TourismData` is read once at startup and never mutated.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TourismError};
use crate::utils::lazy_helpers::materialize_typed;
use crate::utils::calendar::{Month, MONTH_ORDER};

pub const COL_PLACE: &str = "Place";
pub const COL_STATE: &str = "State";
pub const COL_MONTH: &str = "Month";
pub const COL_AVG_VISITORS: &str = "AvgVisitors";
pub const COL_AVG_COST_PER_DAY: &str = "AvgCostPerDay";
pub const COL_TRAVEL_COST_PER_PERSON: &str = "TravelCostPerPerson";
pub const COL_AVG_STAY_DAYS: &str = "AvgStayDays";

const TEXT_COLUMNS: [&str; 3] = [COL_PLACE, COL_STATE, COL_MONTH];
const NUMERIC_COLUMNS: [&str; 4] = [
    COL_AVG_VISITORS,
    COL_AVG_COST_PER_DAY,
    COL_TRAVEL_COST_PER_PERSON,
    COL_AVG_STAY_DAYS,
];

/// One row of the dataset: a place's averages for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TourismRecord {
    pub place: String,
    pub state: String,
    pub month: Month,
    pub avg_visitors: f64,
    /// Local currency units (INR)
    pub avg_cost_per_day: f64,
    pub travel_cost_per_person: f64,
    pub avg_stay_days: f64,
}

/// Immutable in-memory tourism table
#[derive(Debug, Clone, Default)]
pub struct TourismData {
    records: Vec<TourismRecord>,
}

impl TourismData {
    /// Load the dataset from a `.csv` or `.parquet` file
    ///
    /// # Errors
    /// - `MissingSourceFile` if the path does not exist (fatal at startup)
    /// - `MissingColumn` / `MalformedRow` for schema or value problems
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TourismError::MissingSourceFile {
                path: path.to_path_buf(),
            });
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let raw = match extension.as_deref() {
            Some("csv") => Self::read_csv(path)?,
            Some("parquet") => Self::read_parquet(path)?,
            _ => return Err(TourismError::UnsupportedFormat(path.to_path_buf())),
        };

        let data = Self::from_dataframe(&raw)?;

        tracing::info!(
            path = %path.display(),
            rows = data.len(),
            places = data.places().len(),
            "Loaded tourism dataset"
        );

        Ok(data)
    }

    fn read_csv(path: &Path) -> Result<DataFrame> {
        // Scan every row: a decimal late in an integer-looking column must
        // not fail inference. Non-numeric cells surface as MalformedRow.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;
        Ok(df)
    }

    fn read_parquet(path: &Path) -> Result<DataFrame> {
        let df = LazyFrame::scan_parquet(path, Default::default())?.collect()?;
        Ok(df)
    }

    /// Extract typed records from a raw frame with the dataset header
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let typed = materialize_typed(df, &TEXT_COLUMNS, &NUMERIC_COLUMNS)?;

        let places = typed.column(COL_PLACE)?.str()?;
        let states = typed.column(COL_STATE)?.str()?;
        let months = typed.column(COL_MONTH)?.str()?;
        let visitors = typed.column(COL_AVG_VISITORS)?.f64()?;
        let cost_per_day = typed.column(COL_AVG_COST_PER_DAY)?.f64()?;
        let travel_cost = typed.column(COL_TRAVEL_COST_PER_PERSON)?.f64()?;
        let stay_days = typed.column(COL_AVG_STAY_DAYS)?.f64()?;

        let mut records = Vec::with_capacity(typed.height());
        for i in 0..typed.height() {
            // Rows are reported 1-based, header excluded
            let row = i + 1;

            let place = text_at(places, i, row, COL_PLACE)?;
            if place.trim().is_empty() {
                return Err(malformed(row, COL_PLACE, "empty place name"));
            }

            let month_name = text_at(months, i, row, COL_MONTH)?;
            let month = month_name
                .parse::<Month>()
                .map_err(|_| malformed(row, COL_MONTH, &format!("unknown month '{}'", month_name)))?;

            records.push(TourismRecord {
                place: place.to_string(),
                state: text_at(states, i, row, COL_STATE)?.to_string(),
                month,
                avg_visitors: number_at(visitors, i, row, COL_AVG_VISITORS)?,
                avg_cost_per_day: number_at(cost_per_day, i, row, COL_AVG_COST_PER_DAY)?,
                travel_cost_per_person: number_at(travel_cost, i, row, COL_TRAVEL_COST_PER_PERSON)?,
                avg_stay_days: number_at(stay_days, i, row, COL_AVG_STAY_DAYS)?,
            });
        }

        Ok(Self { records })
    }

    /// Build a dataset from already-typed rows
    pub fn from_records(records: Vec<TourismRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[TourismRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct places in first-appearance order
    pub fn places(&self) -> Vec<&str> {
        let mut seen = rustc_hash::FxHashSet::default();
        self.records
            .iter()
            .filter(|r| seen.insert(r.place.as_str()))
            .map(|r| r.place.as_str())
            .collect()
    }

    /// Months that have at least one row, in calendar order
    pub fn months_with_data(&self) -> Vec<Month> {
        let mut present = [false; 12];
        for r in &self.records {
            present[r.month.index()] = true;
        }
        MONTH_ORDER
            .iter()
            .copied()
            .filter(|m| present[m.index()])
            .collect()
    }

    /// All rows for one month
    pub fn for_month(&self, month: Month) -> Vec<&TourismRecord> {
        self.records.iter().filter(|r| r.month == month).collect()
    }

    /// Every row for one place, across months and states
    pub fn rows_for_place(&self, place: &str) -> Vec<&TourismRecord> {
        self.records.iter().filter(|r| r.place == place).collect()
    }

    /// The scope: rows for one month within one state
    pub fn scope(&self, month: Month, state: &str) -> Vec<&TourismRecord> {
        self.records
            .iter()
            .filter(|r| r.month == month && r.state == state)
            .collect()
    }
}

fn malformed(row: usize, column: &str, reason: &str) -> TourismError {
    TourismError::MalformedRow {
        row,
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

fn text_at<'a>(ca: &'a StringChunked, idx: usize, row: usize, column: &str) -> Result<&'a str> {
    ca.get(idx).ok_or_else(|| malformed(row, column, "missing value"))
}

fn number_at(ca: &Float64Chunked, idx: usize, row: usize, column: &str) -> Result<f64> {
    match ca.get(idx) {
        Some(v) if v.is_finite() => Ok(v),
        Some(_) => Err(malformed(row, column, "non-finite number")),
        None => Err(malformed(row, column, "missing or non-numeric value")),
    }
}
