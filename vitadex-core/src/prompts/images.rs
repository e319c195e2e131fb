//! Image-generation prompt templates.

/// Background/environment prompt. Tokens: `{biome}`, `{continent_style}`.
pub const BACKGROUND_PROMPT_TEMPLATE: &str =
    "Stylised {biome} landscape, {continent_style}, fantasy naturalist, no text";

/// Subject illustration prompt. Tokens: `{common_name}`,
/// `{scientific_name}`, `{continent_style}`.
pub const SUBJECT_PROMPT_TEMPLATE: &str = "{common_name} ({scientific_name}), semi-realistic, subtle glow, transparent background, {continent_style}, fantasy naturalist, no text";

/// Render the background prompt for a biome and continent style.
pub fn render_background_prompt(biome: &str, continent_style: &str) -> String {
    BACKGROUND_PROMPT_TEMPLATE
        .replace("{biome}", biome)
        .replace("{continent_style}", continent_style)
}

/// Render the subject prompt for a species and continent style.
pub fn render_subject_prompt(
    common_name: &str,
    scientific_name: &str,
    continent_style: &str,
) -> String {
    SUBJECT_PROMPT_TEMPLATE
        .replace("{common_name}", common_name)
        .replace("{scientific_name}", scientific_name)
        .replace("{continent_style}", continent_style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_prompt_substitutes_all_tokens() {
        let prompt = render_background_prompt("forest", "old-world engraving");
        assert_eq!(
            prompt,
            "Stylised forest landscape, old-world engraving, fantasy naturalist, no text"
        );
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_subject_prompt_substitutes_all_tokens() {
        let prompt = render_subject_prompt("Renard roux", "Vulpes vulpes", "old-world engraving");
        assert!(prompt.starts_with("Renard roux (Vulpes vulpes)"));
        assert!(prompt.contains("transparent background"));
        assert!(!prompt.contains('{'));
    }
}
