//! Calendar constants: canonical month order and the month → season mapping
//!
//! Month order is calendar order, never alphabetical. Every per-month series
//! in the crate is indexed by `Month::index()`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TourismError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// The twelve months in calendar order
pub const MONTH_ORDER: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// Zero-based calendar position (January = 0)
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Static season mapping (Dec/Jan/Feb winter ... Sep/Oct/Nov autumn)
    pub fn season(self) -> Season {
        match self {
            Month::December | Month::January | Month::February => Season::Winter,
            Month::March | Month::April => Season::Spring,
            Month::May => Season::Summer,
            Month::June | Month::July | Month::August => Season::Monsoon,
            Month::September | Month::October | Month::November => Season::Autumn,
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = TourismError;

    /// Accepts the canonical name, any casing of it, or a 3-letter abbreviation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(m) = MONTH_ORDER.iter().find(|m| m.name() == trimmed) {
            return Ok(*m);
        }

        let lower = trimmed.to_ascii_lowercase();
        MONTH_ORDER
            .iter()
            .find(|m| {
                let name = m.name().to_ascii_lowercase();
                name == lower || (lower.len() == 3 && name.starts_with(&lower))
            })
            .copied()
            .ok_or_else(|| TourismError::InvalidMonth(s.to_string()))
    }
}

/// Coarse travel season derived from the calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Monsoon,
    Autumn,
}

pub const ALL_SEASONS: [Season; 5] = [
    Season::Winter,
    Season::Spring,
    Season::Summer,
    Season::Monsoon,
    Season::Autumn,
];

impl Season {
    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::Autumn => "Autumn",
        }
    }

    /// Exact label match; `None` for anything outside the five labels
    pub fn from_label(label: &str) -> Option<Self> {
        ALL_SEASONS.iter().find(|s| s.label() == label).copied()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_order_matches_index() {
        for (i, m) in MONTH_ORDER.iter().enumerate() {
            assert_eq!(m.index(), i);
        }
    }

    #[test]
    fn test_every_month_maps_to_a_season() {
        let winter: Vec<Month> = MONTH_ORDER
            .iter()
            .copied()
            .filter(|m| m.season() == Season::Winter)
            .collect();
        assert_eq!(winter, vec![Month::January, Month::February, Month::December]);
        assert_eq!(Month::May.season(), Season::Summer);
        assert_eq!(Month::August.season(), Season::Monsoon);
        assert_eq!(Month::November.season(), Season::Autumn);
        assert_eq!(Month::April.season(), Season::Spring);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!("March".parse::<Month>().unwrap(), Month::March);
        assert_eq!("march".parse::<Month>().unwrap(), Month::March);
        assert_eq!("Sep".parse::<Month>().unwrap(), Month::September);
        assert!("Smarch".parse::<Month>().is_err());
        assert!("".parse::<Month>().is_err());
    }

    #[test]
    fn test_season_labels_round_trip() {
        for s in ALL_SEASONS {
            assert_eq!(Season::from_label(s.label()), Some(s));
        }
        assert_eq!(Season::from_label("Unknown"), None);
    }

    #[test]
    fn test_month_serializes_as_name() {
        let json = serde_json::to_string(&Month::October).unwrap();
        assert_eq!(json, "\"October\"");
    }
}
