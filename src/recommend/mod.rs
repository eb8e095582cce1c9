//! Recommendation engine
//!
//! Pure functions over the immutable tourism table. "No data" is always an
//! empty or `None` result, never an error.

pub mod alternatives;
pub mod best_season;
pub mod weather_tip;

// Re-export recommendation functions
pub use alternatives::{place_means, suggest_alternatives, PlaceMeans, DEFAULT_ALTERNATIVES};
pub use best_season::{best_season_for_place, monthly_mean_visitors, SeasonOutlook, TOP_MONTHS};
pub use weather_tip::{weather_tip, weather_tip_for_label};
