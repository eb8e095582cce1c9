//! ALTERNATIVE-PLACE RECOMMENDER
//!
//! Given a scope (one state, one month) and a selected place, proposes up to
//! `top_n` places that are cheaper or, failing that, less crowded.
//!
//! **Ranking rules**:
//!   - Places are grouped in sorted name order; every ranking sort is stable,
//!     so equal keys keep that order
//!   - Cheaper places (strictly lower mean cost) always come first
//!   - Less crowded places (strictly lower mean visitors) only fill the gap
//!     when fewer than `top_n` cheaper places exist
//!   - A place appearing in both lists is emitted once

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::TourismRecord;

/// Number of suggestions shown by default
pub const DEFAULT_ALTERNATIVES: usize = 2;

/// Per-place means over a scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceMeans {
    pub place: String,
    pub avg_cost_per_day: f64,
    pub avg_visitors: f64,
}

/// Group rows by place and average cost and visitors, sorted by place name
pub fn place_means<'a, I>(scope: I) -> Vec<PlaceMeans>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    // place → (cost sum, visitor sum, rows)
    let mut groups: BTreeMap<&str, (f64, f64, usize)> = BTreeMap::new();
    for r in scope {
        let entry = groups.entry(r.place.as_str()).or_insert((0.0, 0.0, 0));
        entry.0 += r.avg_cost_per_day;
        entry.1 += r.avg_visitors;
        entry.2 += 1;
    }

    groups
        .into_iter()
        .map(|(place, (cost, visitors, n))| PlaceMeans {
            place: place.to_string(),
            avg_cost_per_day: cost / n as f64,
            avg_visitors: visitors / n as f64,
        })
        .collect()
}

/// Suggest up to `top_n` alternatives to `selected_place` within the scope
pub fn suggest_alternatives<'a, I>(scope: I, selected_place: &str, top_n: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a TourismRecord>,
{
    let means = place_means(scope);
    if means.is_empty() {
        return Vec::new();
    }

    let Some(selected) = means.iter().find(|p| p.place == selected_place) else {
        tracing::debug!(selected_place, "Selected place outside scope; suggesting cheapest");
        return rank_ascending(means.iter(), |p| p.avg_cost_per_day, top_n);
    };

    let cheaper = rank_ascending(
        means.iter().filter(|p| p.avg_cost_per_day < selected.avg_cost_per_day),
        |p| p.avg_cost_per_day,
        top_n,
    );
    if cheaper.len() >= top_n {
        return cheaper;
    }

    let less_crowded = rank_ascending(
        means.iter().filter(|p| p.avg_visitors < selected.avg_visitors),
        |p| p.avg_visitors,
        top_n,
    );

    let mut seen = FxHashSet::default();
    cheaper
        .into_iter()
        .chain(less_crowded)
        .filter(|place| seen.insert(place.clone()))
        .take(top_n)
        .collect()
}

/// Stable ascending sort by `key`, truncated to `n` place names
fn rank_ascending<'a, I, F>(candidates: I, key: F, n: usize) -> Vec<String>
where
    I: Iterator<Item = &'a PlaceMeans>,
    F: Fn(&PlaceMeans) -> f64,
{
    let mut ranked: Vec<&PlaceMeans> = candidates.collect();
    ranked.sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    ranked
        .into_iter()
        .take(n)
        .map(|p| p.place.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calendar::Month;
    use approx::assert_relative_eq;

    fn row(place: &str, cost: f64, visitors: f64) -> TourismRecord {
        TourismRecord {
            place: place.to_string(),
            state: "Kerala".to_string(),
            month: Month::October,
            avg_visitors: visitors,
            avg_cost_per_day: cost,
            travel_cost_per_person: 3000.0,
            avg_stay_days: 3.0,
        }
    }

    #[test]
    fn test_place_means_groups_and_sorts() {
        let scope = vec![row("Munnar", 100.0, 40.0), row("Alleppey", 80.0, 10.0), row("Munnar", 200.0, 60.0)];
        let means = place_means(&scope);
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].place, "Alleppey");
        assert_relative_eq!(means[1].avg_cost_per_day, 150.0, epsilon = 0.0001);
        assert_relative_eq!(means[1].avg_visitors, 50.0, epsilon = 0.0001);
    }

    #[test]
    fn test_cheaper_places_ascending() {
        let scope = vec![row("A", 100.0, 50.0), row("B", 80.0, 70.0), row("C", 60.0, 90.0)];
        assert_eq!(suggest_alternatives(&scope, "A", 2), vec!["C", "B"]);
    }

    #[test]
    fn test_less_crowded_fills_the_gap() {
        let scope = vec![
            row("A", 100.0, 50.0),
            row("B", 80.0, 70.0),
            row("C", 120.0, 10.0),
            row("D", 150.0, 20.0),
        ];
        assert_eq!(suggest_alternatives(&scope, "A", 2), vec!["B", "C"]);
        assert_eq!(suggest_alternatives(&scope, "A", 3), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_place_in_both_lists_is_emitted_once() {
        let scope = vec![row("A", 100.0, 50.0), row("B", 80.0, 10.0), row("C", 120.0, 20.0)];
        assert_eq!(suggest_alternatives(&scope, "A", 2), vec!["B", "C"]);
    }

    #[test]
    fn test_selected_outside_scope_gets_cheapest() {
        let scope = vec![row("A", 100.0, 50.0), row("B", 80.0, 70.0), row("C", 60.0, 90.0)];
        assert_eq!(suggest_alternatives(&scope, "Z", 2), vec!["C", "B"]);
    }

    #[test]
    fn test_equal_costs_keep_name_order() {
        let scope = vec![row("Zeta", 50.0, 5.0), row("Beta", 50.0, 5.0), row("Main", 90.0, 1.0)];
        assert_eq!(suggest_alternatives(&scope, "Main", 2), vec!["Beta", "Zeta"]);
    }

    #[test]
    fn test_empty_scope_and_zero_requested() {
        let empty: Vec<TourismRecord> = Vec::new();
        assert!(suggest_alternatives(&empty, "A", 2).is_empty());

        let scope = vec![row("A", 100.0, 50.0), row("B", 80.0, 70.0)];
        assert!(suggest_alternatives(&scope, "A", 0).is_empty());
    }

    #[test]
    fn test_never_recommends_itself() {
        let scope = vec![row("A", 10.0, 1.0), row("B", 80.0, 70.0)];
        let suggestions = suggest_alternatives(&scope, "A", 2);
        assert!(suggestions.is_empty());
    }
}
