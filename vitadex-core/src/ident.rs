//! Derived card identity.
//!
//! Two scans of the same species on the same continent must collapse to one
//! record, whatever the photos looked like. The key is computed from the
//! extracted common name and continent alone.

/// Lower-case a string and collapse every run of non-alphanumeric
/// characters into a single `-`, trimming leading and trailing separators.
///
/// Total and idempotent: `slugify(slugify(s)) == slugify(s)` for any input.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_separator = true;
        }
    }

    slug
}

/// Derived record key: `slugify(common_name) + "_" + continent`.
///
/// The continent is appended verbatim; it comes from the extraction schema,
/// not from user input.
pub fn card_id(common_name: &str, continent: &str) -> String {
    format!("{}_{}", slugify(common_name), continent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_joins() {
        assert_eq!(slugify("Renard roux"), "renard-roux");
        assert_eq!(slugify("Great Horned Owl"), "great-horned-owl");
    }

    #[test]
    fn test_slugify_collapses_separator_runs() {
        assert_eq!(slugify("fire --- salamander"), "fire-salamander");
        assert_eq!(slugify("a  b\t c"), "a-b-c");
    }

    #[test]
    fn test_slugify_trims_edges() {
        assert_eq!(slugify("  wolf  "), "wolf");
        assert_eq!(slugify("--wolf--"), "wolf");
        assert!(!slugify("!wolf!").starts_with('-'));
        assert!(!slugify("!wolf!").ends_with('-'));
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in [
            "Renard roux",
            "  spotted   Eagle-Ray !!",
            "émeu d'Australie",
            "",
            "---",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_slugify_is_total_on_degenerate_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_card_id_keeps_continent_verbatim() {
        assert_eq!(card_id("Renard roux", "Europe"), "renard-roux_Europe");
        assert_eq!(
            card_id("Bald Eagle", "North America"),
            "bald-eagle_North America"
        );
    }
}
