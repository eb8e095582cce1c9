//! SEASONAL AGGREGATOR: best travel season for a place
//!
//! Infers a coarse season from the months a place has historically been
//! busiest.
//!
//! **Algorithm**:
//!   1. Filter rows to the place (none → `(None, [])`)
//!   2. Mean visitors per month, reindexed over all 12 months (absent = 0)
//!   3. Stable descending sort, take the top 3 (ties keep calendar order)
//!   4. Map each to its season; the most frequent season wins, and a
//!      frequency tie goes to the season seen first in top-3 order

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::data::TourismRecord;
use crate::utils::calendar::{Month, Season, MONTH_ORDER};

/// Number of historically busiest months considered
pub const TOP_MONTHS: usize = 3;

/// Result of best-season inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonOutlook {
    /// `None` when the place has no rows
    pub season: Option<Season>,
    /// Busiest months, highest mean first
    pub top_months: Vec<Month>,
}

impl SeasonOutlook {
    pub fn empty() -> Self {
        Self {
            season: None,
            top_months: Vec::new(),
        }
    }
}

/// Mean visitors per calendar month, 0 for months without rows
pub fn monthly_mean_visitors<'a, I>(records: I) -> [f64; 12]
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let mut sums = [0.0f64; 12];
    let mut counts = [0usize; 12];

    for r in records {
        let idx = r.month.index();
        sums[idx] += r.avg_visitors;
        counts[idx] += 1;
    }

    let mut means = [0.0f64; 12];
    for idx in 0..12 {
        if counts[idx] > 0 {
            means[idx] = sums[idx] / counts[idx] as f64;
        }
    }
    means
}

/// Best season and top months for `place`
pub fn best_season_for_place<'a, I>(records: I, place: &str) -> SeasonOutlook
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let rows: Vec<&TourismRecord> = records.into_iter().filter(|r| r.place == place).collect();
    if rows.is_empty() {
        tracing::debug!(place, "No rows for place; no season info");
        return SeasonOutlook::empty();
    }

    let means = monthly_mean_visitors(rows);
    let top_months = top_months_by_mean(&means, TOP_MONTHS);
    let season = dominant_season(&top_months);

    SeasonOutlook { season, top_months }
}

/// The `k` months with the highest mean, highest first
///
/// `sort_by` is stable, so equal means stay in calendar order.
pub fn top_months_by_mean(means: &[f64; 12], k: usize) -> Vec<Month> {
    let mut ranked: Vec<Month> = MONTH_ORDER.to_vec();
    ranked.sort_by(|a, b| {
        means[b.index()]
            .partial_cmp(&means[a.index()])
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(k);
    ranked
}

/// Most frequent season among `months`; first-seen wins a frequency tie
pub fn dominant_season(months: &[Month]) -> Option<Season> {
    let seasons: SmallVec<[Season; TOP_MONTHS]> = months.iter().map(|m| m.season()).collect();

    let mut best: Option<(Season, usize)> = None;
    for &season in &seasons {
        let count = seasons.iter().filter(|&&s| s == season).count();
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((season, count));
        }
    }

    best.map(|(season, _)| season)
}
