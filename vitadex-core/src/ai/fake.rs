//! Fake AI client for testing and credential-less runs.
//!
//! Returns deterministic payloads without network access or API costs, and
//! records how many calls of each kind it served so tests can assert that
//! the dedup path really skips generation.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use super::{AiClient, AiError, ExtractRequest};

/// A minimal valid 1x1 transparent PNG, enough for any consumer that only
/// stores or re-encodes the payload.
pub const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// A fake AI client.
///
/// By default it answers every extraction with a plausible canned payload
/// and every image request with [`TINY_PNG`].
#[derive(Debug)]
pub struct FakeAiClient {
    /// Arguments JSON returned by `extract`; `None` simulates a model that
    /// produced no structured call.
    extraction: RwLock<Option<String>>,
    /// When set, every image request fails.
    fail_images: bool,
    extract_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl Default for FakeAiClient {
    fn default() -> Self {
        Self::with_extraction(
            r#"{
                "common_name": "Renard roux",
                "scientific_name": "Vulpes vulpes",
                "category": "mammal",
                "biome": "forest",
                "continent": "Europe",
                "traits": ["crepuscular", "omnivorous", "solitary", "territorial"],
                "average_size": "45-90 cm",
                "life_expectancy": "3-5 years in the wild",
                "professional_description": "A highly adaptable canid with a russet coat and a white-tipped tail, thriving from woodland edges to city margins.",
                "rarity": "common"
            }"#,
        )
    }
}

impl FakeAiClient {
    /// Fake that returns the given arguments JSON for every extraction.
    pub fn with_extraction(arguments_json: &str) -> Self {
        Self {
            extraction: RwLock::new(Some(arguments_json.to_string())),
            fail_images: false,
            extract_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// Fake whose model never makes the structured call.
    pub fn with_empty_extraction() -> Self {
        Self {
            extraction: RwLock::new(None),
            fail_images: false,
            extract_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
        }
    }

    /// Make every image-generation call fail.
    pub fn failing_images(mut self) -> Self {
        self.fail_images = true;
        self
    }

    /// Number of extraction calls served so far.
    pub fn extract_calls(&self) -> usize {
        self.extract_calls.load(Ordering::Relaxed)
    }

    /// Number of image-generation calls served so far.
    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn extract(&self, _request: ExtractRequest) -> Result<Option<String>, AiError> {
        self.extract_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.extraction.read().unwrap().clone())
    }

    async fn generate_image(&self, _prompt: &str) -> Result<Vec<u8>, AiError> {
        self.image_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_images {
            return Err(AiError::Api("fake image failure".to_string()));
        }
        Ok(TINY_PNG.to_vec())
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ToolSpec;

    fn request() -> ExtractRequest {
        ExtractRequest {
            system: "system".to_string(),
            user_text: "user".to_string(),
            image: None,
            tool: ToolSpec {
                name: "spec_extract",
                description: "extract",
                parameters: serde_json::json!({}),
            },
        }
    }

    #[tokio::test]
    async fn test_default_extraction_is_valid_metadata() {
        let fake = FakeAiClient::default();
        let arguments = fake.extract(request()).await.unwrap().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&arguments).unwrap();
        assert_eq!(parsed["common_name"], "Renard roux");
        assert_eq!(fake.extract_calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_extraction_returns_none() {
        let fake = FakeAiClient::with_empty_extraction();
        assert!(fake.extract(request()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_image_counter_and_failure_switch() {
        let fake = FakeAiClient::default();
        let png = fake.generate_image("a fox").await.unwrap();
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
        assert_eq!(fake.image_calls(), 1);

        let failing = FakeAiClient::default().failing_images();
        assert!(failing.generate_image("a fox").await.is_err());
        assert_eq!(failing.image_calls(), 1);
    }
}
