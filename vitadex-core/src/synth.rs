//! Card artwork synthesis: the two image-generation calls.

use crate::ai::AiClient;
use crate::error::SynthError;
use crate::prompts::images::{render_background_prompt, render_subject_prompt};
use crate::style::continent_style;
use crate::types::SpeciesMetadata;

/// The two generated images of one card.
#[derive(Debug, Clone)]
pub struct CardArt {
    pub background_png: Vec<u8>,
    pub subject_png: Vec<u8>,
}

/// Generate the background scene and the subject illustration.
///
/// The calls share the continent-derived style and carry no ordering
/// dependency, but are issued background-first like the rest of the
/// pipeline: strictly one at a time. Either call failing, or answering
/// without an image payload, fails the whole request; a lone successful
/// image is never persisted.
pub async fn generate_card_art(
    ai: &dyn AiClient,
    metadata: &SpeciesMetadata,
) -> Result<CardArt, SynthError> {
    let style = continent_style(&metadata.continent);

    let background_png = ai
        .generate_image(&render_background_prompt(metadata.biome.as_str(), style))
        .await
        .map_err(|e| SynthError::Generation(format!("background: {}", e)))?;

    let subject_png = ai
        .generate_image(&render_subject_prompt(
            &metadata.common_name,
            &metadata.scientific_name,
            style,
        ))
        .await
        .map_err(|e| SynthError::Generation(format!("subject: {}", e)))?;

    Ok(CardArt {
        background_png,
        subject_png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{FakeAiClient, TINY_PNG};
    use crate::types::{Biome, Category, Rarity};

    fn metadata() -> SpeciesMetadata {
        SpeciesMetadata {
            common_name: "Renard roux".to_string(),
            scientific_name: "Vulpes vulpes".to_string(),
            category: Category::Mammal,
            biome: Biome::Forest,
            continent: "Europe".to_string(),
            traits: [
                "crepuscular".to_string(),
                "omnivorous".to_string(),
                "solitary".to_string(),
                "territorial".to_string(),
            ],
            average_size: "45-90 cm".to_string(),
            life_expectancy: "3-5 years".to_string(),
            professional_description: "A very adaptable canid.".to_string(),
            rarity: Rarity::Common,
        }
    }

    #[tokio::test]
    async fn test_generates_both_images() {
        let fake = FakeAiClient::default();
        let art = generate_card_art(&fake, &metadata()).await.unwrap();
        assert_eq!(art.background_png, TINY_PNG);
        assert_eq!(art.subject_png, TINY_PNG);
        assert_eq!(fake.image_calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_is_terminal_for_the_request() {
        let fake = FakeAiClient::default().failing_images();
        let err = generate_card_art(&fake, &metadata()).await.unwrap_err();
        let SynthError::Generation(message) = err;
        assert!(message.contains("background"));
        // The subject call was never issued after the background failed.
        assert_eq!(fake.image_calls(), 1);
    }
}
