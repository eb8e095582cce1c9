//! Weather Advisory Lookup
//!
//! Static season → travel tip table. Lookups are total: anything outside the
//! five seasons yields an empty string.

use crate::utils::calendar::Season;

static SEASON_TIPS: &[(Season, &str)] = &[
    (Season::Winter, "Pleasant and cool; carry light woolens for mornings/evenings."),
    (Season::Spring, "Mild weather; great for sightseeing and outdoor walks."),
    (Season::Summer, "Warm/hot; stay hydrated, prefer early-morning outings."),
    (Season::Monsoon, "Expect rain; carry a raincoat/umbrella and check local advisories."),
    (Season::Autumn, "Clear skies and good visibility; ideal for outdoor photography."),
];

/// Travel tip for a season, `""` for `None`
pub fn weather_tip(season: Option<Season>) -> &'static str {
    season
        .and_then(|s| SEASON_TIPS.iter().find(|(key, _)| *key == s))
        .map(|(_, tip)| *tip)
        .unwrap_or("")
}

/// Travel tip for a free-form season label, `""` if the label is unknown
pub fn weather_tip_for_label(label: &str) -> &'static str {
    weather_tip(Season::from_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calendar::ALL_SEASONS;

    #[test]
    fn test_every_season_has_a_tip() {
        for season in ALL_SEASONS {
            assert!(!weather_tip(Some(season)).is_empty(), "{season} has no tip");
        }
    }

    #[test]
    fn test_unknown_yields_empty() {
        assert_eq!(weather_tip(None), "");
        assert_eq!(weather_tip_for_label("Unknown"), "");
        assert_eq!(weather_tip_for_label(""), "");
    }

    #[test]
    fn test_monsoon_tip_mentions_rain() {
        assert!(weather_tip_for_label("Monsoon").contains("rain"));
    }
}
