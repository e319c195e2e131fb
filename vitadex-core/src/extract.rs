//! Species metadata extraction from a photo or description via the vision
//! model.

use serde::Deserialize;

use crate::ai::{AiClient, ExtractRequest, ImageData};
use crate::error::ExtractError;
use crate::prompts::extract::{extract_tool_spec, render_extract_system_prompt, render_scan_user_text};
use crate::types::{Biome, Category, Rarity, ScanInput, ScanRequest, SpeciesMetadata};

/// Wire shape of the `spec_extract` call arguments.
#[derive(Debug, Deserialize)]
struct ExtractPayload {
    common_name: String,
    scientific_name: String,
    category: Category,
    biome: Biome,
    continent: String,
    traits: [String; 4],
    average_size: String,
    life_expectancy: String,
    professional_description: String,
    rarity: Rarity,
    #[serde(default)]
    html_card: Option<String>,
}

/// Result of a successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub metadata: SpeciesMetadata,
    pub html_card: Option<String>,
}

/// Run the extraction call and validate its structured output.
///
/// Terminal failures: no structured call at all ([`ExtractError::Empty`]),
/// or arguments that fail the schema ([`ExtractError::Malformed`]). Nothing
/// is repaired, retried or persisted on either.
pub async fn extract_species(
    ai: &dyn AiClient,
    request: &ScanRequest,
) -> Result<Extraction, ExtractError> {
    let (image, description) = match &request.input {
        ScanInput::Photo { base64, media_type } => (
            Some(ImageData {
                base64: base64.clone(),
                media_type: media_type.clone(),
            }),
            None,
        ),
        ScanInput::Description(text) => (None, Some(text.as_str())),
    };

    let extract_request = ExtractRequest {
        system: render_extract_system_prompt(),
        user_text: render_scan_user_text(request.latitude, request.longitude, description),
        image,
        tool: extract_tool_spec(),
    };

    let arguments = ai
        .extract(extract_request)
        .await?
        .ok_or(ExtractError::Empty)?;

    let payload: ExtractPayload = serde_json::from_str(&arguments)
        .map_err(|e| ExtractError::Malformed(e.to_string()))?;

    Ok(Extraction {
        metadata: SpeciesMetadata {
            common_name: payload.common_name,
            scientific_name: payload.scientific_name,
            category: payload.category,
            biome: payload.biome,
            continent: payload.continent,
            traits: payload.traits,
            average_size: payload.average_size,
            life_expectancy: payload.life_expectancy,
            professional_description: payload.professional_description,
            rarity: payload.rarity,
        },
        html_card: payload.html_card,
    })
}
