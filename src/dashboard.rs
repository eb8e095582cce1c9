//! Dashboard panels and their dependency graph
//!
//! ```text
//!   month ───────────────► MonthPanel (top states, trend lines)
//!   month, state, place ─► PlacePanel (season, tip, alternatives,
//!                                      distribution, quick stats)
//! ```
//!
//! `Dashboard::refresh` recomputes a panel only when one of its inputs
//! changed. The result is always identical to a fresh `Dashboard::build`.

use serde::{Deserialize, Serialize};

use crate::analytics::{
    monthly_trends, place_profiles, quick_stats, top_places, top_states, PlaceVisitors,
    QuickStats, StateTrend, StateVisitors,
};
use crate::config::AppConfig;
use crate::data::TourismData;
use crate::recommend::{best_season_for_place, suggest_alternatives, weather_tip, PlaceMeans, SeasonOutlook};
use crate::session::Selection;
use crate::utils::calendar::Month;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPanel {
    pub month: Month,
    /// Empty when the month has no data
    pub top_states: Vec<StateVisitors>,
    pub trends: Vec<StateTrend>,
}

impl MonthPanel {
    pub fn compute(data: &TourismData, month: Month, top_k_states: usize) -> Self {
        let top_states = top_states(data.for_month(month), top_k_states);
        let names: Vec<String> = top_states.iter().map(|s| s.state.clone()).collect();
        let trends = monthly_trends(data.records(), &names);

        Self {
            month,
            top_states,
            trends,
        }
    }

    pub fn has_data(&self) -> bool {
        !self.top_states.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacePanel {
    pub month: Month,
    pub state: String,
    pub place: String,
    /// Computed over the whole table, not just the scope
    pub outlook: SeasonOutlook,
    /// Empty when there is no season
    pub weather_tip: String,
    pub alternatives: Vec<String>,
    pub top_places: Vec<PlaceVisitors>,
    pub profiles: Vec<PlaceMeans>,
    pub quick_stats: Option<QuickStats>,
}

impl PlacePanel {
    pub fn compute(data: &TourismData, month: Month, state: &str, place: &str, config: &AppConfig) -> Self {
        let scope = data.scope(month, state);
        let outlook = best_season_for_place(data.records(), place);
        let weather_tip = weather_tip(outlook.season).to_string();

        Self {
            month,
            state: state.to_string(),
            place: place.to_string(),
            weather_tip,
            alternatives: suggest_alternatives(scope.iter().copied(), place, config.alternatives),
            top_places: top_places(scope.iter().copied(), config.top_places),
            profiles: place_profiles(scope.iter().copied()),
            quick_stats: quick_stats(scope.iter().copied(), place),
            outlook,
        }
    }

    fn inputs_match(&self, month: Month, state: &str, place: &str) -> bool {
        self.month == month && self.state == state && self.place == place
    }
}

/// Which panels a refresh recomputed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    pub month_recomputed: bool,
    pub place_recomputed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub month: MonthPanel,
    /// `None` until a state and place are resolved
    pub place: Option<PlacePanel>,
}

impl Dashboard {
    pub fn build(data: &TourismData, selection: &Selection, config: &AppConfig) -> Self {
        let month = MonthPanel::compute(data, selection.month, config.top_states);
        let place = Self::place_panel(data, selection, config);
        Self { month, place }
    }

    /// Recompute only the panels whose inputs differ from `selection`
    pub fn refresh(self, data: &TourismData, selection: &Selection, config: &AppConfig) -> (Self, RefreshReport) {
        let mut report = RefreshReport::default();

        let month = if self.month.month == selection.month {
            self.month
        } else {
            report.month_recomputed = true;
            MonthPanel::compute(data, selection.month, config.top_states)
        };

        let place = match (self.place, selection.state.as_deref(), selection.place.as_deref()) {
            (Some(panel), Some(state), Some(place)) if panel.inputs_match(selection.month, state, place) => Some(panel),
            (previous, _, _) => {
                let next = Self::place_panel(data, selection, config);
                report.place_recomputed = previous.is_some() || next.is_some();
                next
            }
        };

        tracing::debug!(
            month = report.month_recomputed,
            place = report.place_recomputed,
            "Dashboard refreshed"
        );

        (Self { month, place }, report)
    }

    fn place_panel(data: &TourismData, selection: &Selection, config: &AppConfig) -> Option<PlacePanel> {
        let state = selection.state.as_deref()?;
        let place = selection.place.as_deref()?;
        Some(PlacePanel::compute(data, selection.month, state, place, config))
    }
}
