//! Seasonal Tourism Trends
//!
//! Analytics and recommendations over a table of Indian tourism statistics
//! (place, state, month, visitors, costs, stay length).
//!
//! Module layout:
//! - `data`: Dataset loading with Polars (CSV or Parquet)
//! - `recommend/`: Best season, weather tips, alternative places
//! - `analytics`: Top states, monthly trends, place distributions
//! - `budget`: Trip budget estimate and trip-summary CSV export
//! - `session`: Pure selection model driven by events
//! - `dashboard`: Panel dependency graph with selective recompute
//! - `api_server`: JSON API (feature `api`)

pub mod analytics;
pub mod budget;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod recommend;
pub mod session;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use config::AppConfig;
pub use dashboard::{Dashboard, MonthPanel, PlacePanel, RefreshReport};
pub use data::{TourismData, TourismRecord};
pub use error::{Result, TourismError};
pub use recommend::*;
pub use session::{apply_event, Selection, SelectionEvent, UserProfile};
pub use utils::{Month, Season, MONTH_ORDER};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
