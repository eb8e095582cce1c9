//! Shared utilities
//!
//! - Calendar: canonical month order and the month → season mapping
//! - LazyFrame helpers: Safe materialization with column validation

pub mod calendar;
pub mod lazy_helpers;

// Re-export commonly used types
pub use calendar::{Month, Season, ALL_SEASONS, MONTH_ORDER};
pub use lazy_helpers::{materialize_typed, require_columns};
