//! Continent-derived illustration style.

/// Style used when the extracted continent is not one of the seven known
/// names. Never an error: every continent string maps to some style.
pub const FALLBACK_STYLE: &str = "fantasy naturalist palette";

/// Map a continent name to a fixed illustration style descriptor.
///
/// Total over all inputs; unrecognized continents get [`FALLBACK_STYLE`].
pub fn continent_style(continent: &str) -> &'static str {
    match continent {
        "Africa" => "sun-bleached ochre palette, acacia silhouettes",
        "Antarctica" => "pale glacial light, ice-blue gradients",
        "Asia" => "ink-wash mist, jade and vermilion accents",
        "Europe" => "old-world copperplate engraving tones",
        "North America" => "crisp frontier field-guide colors",
        "Oceania" => "coral-toned island light, turquoise shallows",
        "South America" => "lush emerald canopy, golden dusk light",
        _ => FALLBACK_STYLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_continents_have_distinct_styles() {
        let continents = [
            "Africa",
            "Antarctica",
            "Asia",
            "Europe",
            "North America",
            "Oceania",
            "South America",
        ];
        let styles: Vec<&str> = continents.iter().map(|c| continent_style(c)).collect();
        for style in &styles {
            assert!(!style.is_empty());
            assert_ne!(*style, FALLBACK_STYLE);
        }
        let mut deduped = styles.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), styles.len());
    }

    #[test]
    fn test_mapping_is_total() {
        for input in ["Atlantis", "", "europe", "北アメリカ"] {
            assert_eq!(continent_style(input), FALLBACK_STYLE);
            assert!(!continent_style(input).is_empty());
        }
    }
}
