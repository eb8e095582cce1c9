//! Trip budget estimator and trip-summary export
//!
//! Budget = cost/day × days × travelers + travel cost × travelers, using the
//! first scope row for the place. The trip summary is the only artifact the
//! system persists: a one-row CSV written with the Polars CSV writer.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::data::TourismRecord;
use crate::error::{Result, TourismError};
use crate::utils::calendar::Month;

/// Default download name for the trip summary
pub const TRIP_PLAN_FILE_NAME: &str = "trip_plan.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetEstimate {
    pub place: String,
    pub travelers: u32,
    pub days: u32,
    pub cost_per_day: f64,
    pub travel_cost_per_person: f64,
    pub total: f64,
}

impl BudgetEstimate {
    /// Two-line cost breakdown for display
    pub fn breakdown(&self) -> String {
        format!(
            "Accommodation+food: ₹{}/day per person\nTravel per person: ₹{}",
            format_inr(self.cost_per_day),
            format_inr(self.travel_cost_per_person)
        )
    }
}

/// Estimate the trip budget for `place` within the scope
///
/// Returns `Ok(None)` when the place has no row in the scope.
///
/// # Errors
/// `InvalidTripParameters` if `travelers` or `days` is zero.
pub fn estimate_budget<'a, I>(
    scope: I,
    place: &str,
    travelers: u32,
    days: u32,
) -> Result<Option<BudgetEstimate>>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    validate_trip(travelers, days)?;

    let Some(row) = scope.into_iter().find(|r| r.place == place) else {
        return Ok(None);
    };

    let people = f64::from(travelers);
    let total = row.avg_cost_per_day * f64::from(days) * people + row.travel_cost_per_person * people;

    Ok(Some(BudgetEstimate {
        place: row.place.clone(),
        travelers,
        days,
        cost_per_day: row.avg_cost_per_day,
        travel_cost_per_person: row.travel_cost_per_person,
        total,
    }))
}

pub fn validate_trip(travelers: u32, days: u32) -> Result<()> {
    if travelers == 0 {
        return Err(TourismError::InvalidTripParameters(
            "number of travelers must be at least 1".to_string(),
        ));
    }
    if days == 0 {
        return Err(TourismError::InvalidTripParameters(
            "number of days must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Downloadable trip plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub user: String,
    pub email: String,
    pub month: Month,
    pub state: String,
    pub place: String,
    pub travelers: u32,
    pub days: u32,
    /// Whole rupees, truncated
    pub estimated_budget_inr: i64,
}

impl TripSummary {
    pub fn new(user: &str, email: &str, month: Month, state: &str, estimate: &BudgetEstimate) -> Self {
        Self {
            user: user.to_string(),
            email: email.to_string(),
            month,
            state: state.to_string(),
            place: estimate.place.clone(),
            travelers: estimate.travelers,
            days: estimate.days,
            estimated_budget_inr: estimate.total.trunc() as i64,
        }
    }

    fn to_dataframe(&self) -> Result<DataFrame> {
        let df = df![
            "User" => [self.user.as_str()],
            "Email" => [self.email.as_str()],
            "Month" => [self.month.name()],
            "State" => [self.state.as_str()],
            "Place" => [self.place.as_str()],
            "Travelers" => [i64::from(self.travelers)],
            "Days" => [i64::from(self.days)],
            "EstimatedBudgetINR" => [self.estimated_budget_inr],
        ]?;
        Ok(df)
    }

    /// Header row plus one data row
    pub fn to_csv(&self) -> Result<String> {
        let mut df = self.to_dataframe()?;
        let mut buf = Vec::new();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut df = self.to_dataframe()?;
        let file = File::create(path.as_ref())?;
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
        tracing::info!(path = %path.as_ref().display(), "Wrote trip summary");
        Ok(())
    }
}

/// Whole-rupee amount with comma thousands separators
pub fn format_inr(amount: f64) -> String {
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if whole < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
