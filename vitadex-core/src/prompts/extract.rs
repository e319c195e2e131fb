//! Extraction prompt and the `spec_extract` structured-call schema.

use serde_json::json;

use crate::ai::ToolSpec;
use crate::types::{Biome, Category, Rarity};

/// Name of the structured call the extraction request is constrained to.
pub const EXTRACT_TOOL_NAME: &str = "spec_extract";

/// Single-line HTML shell the model fills in when it returns `html_card`.
/// The render screen draws the same 400x640 canvas client-side; the markup
/// is stored as an optional convenience for standalone export.
pub const HTML_CARD_TEMPLATE: &str = r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><title>{common_name}</title></head><body><canvas id="c" width="400" height="640"></canvas><button id="dl">Download card</button></body></html>"#;

/// Render the extraction system prompt.
pub fn render_extract_system_prompt() -> String {
    format!(
        r#"You are a field biologist and the VitaDex card integrator.

From the latitude and longitude provided by the user, determine the continent where the sighting happened. Then extract the naturalistic metadata for the photographed or described organism.

Rules:
- Answer ONLY through the {tool} function call. Never answer in prose.
- Use the continent names Africa, Antarctica, Asia, Europe, North America, Oceania or South America.
- Give exactly four short traits.
- professional_description is two or three sentences in a museum-plaque register.
- Optionally return html_card: this template filled for the organism, collapsed to a single line: {template}"#,
        tool = EXTRACT_TOOL_NAME,
        template = HTML_CARD_TEMPLATE,
    )
}

/// Render the user-message text: the coordinates as plain text (the model
/// infers the continent itself; there is no local geocoding) plus the
/// description when the capture was textual.
pub fn render_scan_user_text(latitude: f64, longitude: f64, description: Option<&str>) -> String {
    match description {
        Some(text) => format!(
            "Sighting at latitude {latitude}, longitude {longitude}.\nDescription: {text}"
        ),
        None => format!(
            "Sighting at latitude {latitude}, longitude {longitude}. The organism is in the attached photo."
        ),
    }
}

/// The fixed `spec_extract` schema. Any response not matching it is an
/// extraction failure, never coerced.
pub fn extract_tool_spec() -> ToolSpec {
    ToolSpec {
        name: EXTRACT_TOOL_NAME,
        description: "Record the extracted naturalistic metadata for one sighted organism.",
        parameters: json!({
            "type": "object",
            "properties": {
                "common_name": {
                    "type": "string",
                    "description": "Common name in the user's language"
                },
                "scientific_name": {
                    "type": "string",
                    "description": "Latin binomial name"
                },
                "category": { "type": "string", "enum": Category::NAMES },
                "biome": { "type": "string", "enum": Biome::NAMES },
                "continent": {
                    "type": "string",
                    "description": "Continent inferred from the coordinates"
                },
                "traits": {
                    "type": "array",
                    "items": { "type": "string" },
                    "minItems": 4,
                    "maxItems": 4,
                    "description": "Exactly four short behavioural or physical traits"
                },
                "average_size": { "type": "string" },
                "life_expectancy": { "type": "string" },
                "professional_description": { "type": "string" },
                "rarity": { "type": "string", "enum": Rarity::NAMES },
                "html_card": {
                    "type": "string",
                    "description": "The filled single-line HTML card template"
                }
            },
            "required": [
                "common_name",
                "scientific_name",
                "category",
                "biome",
                "continent",
                "traits",
                "average_size",
                "life_expectancy",
                "professional_description",
                "rarity"
            ],
            "additionalProperties": false
        }),
    }
}
