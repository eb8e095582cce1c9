//! Dashboard analytics
//!
//! Aggregates behind the month overview (top states, monthly trend lines)
//! and the place panels (visitor distribution, cost/visitor profile, quick
//! stats). Grouped results come out in sorted key order and every ranking
//! uses a stable sort.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::TourismRecord;
use crate::recommend::{monthly_mean_visitors, place_means, PlaceMeans};

pub const DEFAULT_TOP_STATES: usize = 5;
pub const DEFAULT_TOP_PLACES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVisitors {
    pub state: String,
    pub avg_visitors: f64,
}

/// One trend line: mean visitors per calendar month (January first)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTrend {
    pub state: String,
    pub visitors: [f64; 12],
}

/// Slice of the top-places visitor distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceVisitors {
    pub place: String,
    pub avg_visitors: f64,
    /// Percentage of the combined visitors of the listed places
    pub share: f64,
}

/// Headline numbers for the selected place (first matching scope row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickStats {
    pub place: String,
    pub avg_visitors: f64,
    pub avg_stay_days: f64,
    pub avg_cost_per_day: f64,
    pub travel_cost_per_person: f64,
}

/// The `k` states with the highest mean visitors among `month_rows`
///
/// An empty input (no data for the month) gives an empty list.
pub fn top_states<'a, I>(month_rows: I, k: usize) -> Vec<StateVisitors>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in month_rows {
        let entry = groups.entry(r.state.as_str()).or_insert((0.0, 0));
        entry.0 += r.avg_visitors;
        entry.1 += 1;
    }

    let mut ranked: Vec<StateVisitors> = groups
        .into_iter()
        .map(|(state, (sum, n))| StateVisitors {
            state: state.to_string(),
            avg_visitors: sum / n as f64,
        })
        .collect();

    ranked.sort_by(|a, b| descending(a.avg_visitors, b.avg_visitors));
    ranked.truncate(k);
    ranked
}

/// Monthly visitor trend lines for `states`, sorted by state name
///
/// States without any rows still get a line of zeros.
pub fn monthly_trends<'a, I>(records: I, states: &[String]) -> Vec<StateTrend>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let mut by_state: BTreeMap<&str, Vec<&TourismRecord>> = states
        .iter()
        .map(|s| (s.as_str(), Vec::new()))
        .collect();

    for r in records {
        if let Some(rows) = by_state.get_mut(r.state.as_str()) {
            rows.push(r);
        }
    }

    by_state
        .into_iter()
        .map(|(state, rows)| StateTrend {
            state: state.to_string(),
            visitors: monthly_mean_visitors(rows),
        })
        .collect()
}

/// Distinct places of a scope in first-appearance order
pub fn places_in_scope<'a, I>(scope: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let mut places: Vec<String> = Vec::new();
    for r in scope {
        if !places.iter().any(|p| *p == r.place) {
            places.push(r.place.clone());
        }
    }
    places
}

/// The `k` most visited places of a scope with their share of the total
pub fn top_places<'a, I>(scope: I, k: usize) -> Vec<PlaceVisitors>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let mut means = place_means(scope);
    means.sort_by(|a, b| descending(a.avg_visitors, b.avg_visitors));
    means.truncate(k);

    let total: f64 = means.iter().map(|p| p.avg_visitors).sum();
    means
        .into_iter()
        .map(|p| PlaceVisitors {
            share: if total > 0.0 { p.avg_visitors / total * 100.0 } else { 0.0 },
            place: p.place,
            avg_visitors: p.avg_visitors,
        })
        .collect()
}

/// Mean cost and visitors per place (cost-vs-crowd explorer data)
pub fn place_profiles<'a, I>(scope: I) -> Vec<PlaceMeans>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    place_means(scope)
}

/// Quick stats from the first scope row for `place`
pub fn quick_stats<'a, I>(scope: I, place: &str) -> Option<QuickStats>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    scope
        .into_iter()
        .find(|r| r.place == place)
        .map(|r| QuickStats {
            place: r.place.clone(),
            avg_visitors: r.avg_visitors,
            avg_stay_days: r.avg_stay_days,
            avg_cost_per_day: r.avg_cost_per_day,
            travel_cost_per_person: r.travel_cost_per_person,
        })
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calendar::Month;
    use approx::assert_relative_eq;

    fn row(place: &str, state: &str, month: Month, visitors: f64) -> TourismRecord {
        TourismRecord {
            place: place.to_string(),
            state: state.to_string(),
            month,
            avg_visitors: visitors,
            avg_cost_per_day: 2000.0,
            travel_cost_per_person: 4000.0,
            avg_stay_days: 3.0,
        }
    }

    #[test]
    fn test_top_states_ranked_by_mean() {
        let rows = vec![
            row("Jaipur", "Rajasthan", Month::January, 900.0),
            row("Udaipur", "Rajasthan", Month::January, 100.0),
            row("Goa Beach", "Goa", Month::January, 800.0),
            row("Agra", "Uttar Pradesh", Month::January, 300.0),
        ];
        let states = top_states(&rows, 2);
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].state, "Goa");
        assert_eq!(states[1].state, "Rajasthan");
        assert_relative_eq!(states[1].avg_visitors, 500.0, epsilon = 0.0001);
    }

    #[test]
    fn test_top_states_ties_keep_name_order() {
        let rows = vec![
            row("X", "Sikkim", Month::March, 10.0),
            row("Y", "Assam", Month::March, 10.0),
        ];
        let states = top_states(&rows, 5);
        assert_eq!(states[0].state, "Assam");
        assert_eq!(states[1].state, "Sikkim");
    }

    #[test]
    fn test_top_states_empty_month() {
        let rows: Vec<TourismRecord> = Vec::new();
        assert!(top_states(&rows, 5).is_empty());
    }

    #[test]
    fn test_monthly_trends_fill_missing_months() {
        let rows = vec![
            row("Jaipur", "Rajasthan", Month::January, 900.0),
            row("Jaipur", "Rajasthan", Month::January, 700.0),
            row("Goa Beach", "Goa", Month::December, 800.0),
            row("Agra", "Uttar Pradesh", Month::January, 300.0),
        ];
        let trends = monthly_trends(&rows, &["Rajasthan".to_string(), "Goa".to_string()]);
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].state, "Goa");
        assert_relative_eq!(trends[0].visitors[Month::December.index()], 800.0, epsilon = 0.0001);
        assert_relative_eq!(trends[1].visitors[Month::January.index()], 800.0, epsilon = 0.0001);
        assert_relative_eq!(trends[1].visitors[Month::July.index()], 0.0, epsilon = 0.0001);
    }

    #[test]
    fn test_places_in_scope_first_appearance() {
        let rows = vec![
            row("Udaipur", "Rajasthan", Month::January, 1.0),
            row("Jaipur", "Rajasthan", Month::January, 1.0),
            row("Udaipur", "Rajasthan", Month::January, 1.0),
        ];
        assert_eq!(places_in_scope(&rows), vec!["Udaipur", "Jaipur"]);
    }

    #[test]
    fn test_top_places_shares() {
        let rows = vec![
            row("Udaipur", "Rajasthan", Month::January, 100.0),
            row("Jaipur", "Rajasthan", Month::January, 300.0),
        ];
        let places = top_places(&rows, 5);
        assert_eq!(places[0].place, "Jaipur");
        assert_relative_eq!(places[0].share, 75.0, epsilon = 0.0001);
        assert_relative_eq!(places[1].share, 25.0, epsilon = 0.0001);
    }

    #[test]
    fn test_quick_stats_uses_first_row() {
        let mut second = row("Jaipur", "Rajasthan", Month::January, 50.0);
        second.avg_stay_days = 9.0;
        let rows = vec![row("Jaipur", "Rajasthan", Month::January, 100.0), second];

        let stats = quick_stats(&rows, "Jaipur").unwrap();
        assert_relative_eq!(stats.avg_visitors, 100.0, epsilon = 0.0001);
        assert_relative_eq!(stats.avg_stay_days, 3.0, epsilon = 0.0001);
        assert!(quick_stats(&rows, "Ajmer").is_none());
    }
}
