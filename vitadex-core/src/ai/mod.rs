//! AI client abstraction for extraction and image synthesis.
//!
//! This module provides a trait-based abstraction over the vision/extraction
//! model and the image-generation model, with a deterministic fake
//! implementation for tests and credential-less runs.

mod fake;
mod openai;

pub use fake::{FakeAiClient, TINY_PNG};
pub use openai::OpenAiClient;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

pub use crate::error::AiError;

/// An inline image attached to an extraction request.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub base64: String,
    pub media_type: String,
}

/// The structured call the extraction request is constrained to.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    /// JSON Schema for the call arguments.
    pub parameters: serde_json::Value,
}

/// One extraction request: system instruction, user content (coordinates
/// text plus an optional inline photo), and the forced structured call.
#[derive(Debug, Clone)]
pub struct ExtractRequest {
    pub system: String,
    pub user_text: String,
    pub image: Option<ImageData>,
    pub tool: ToolSpec,
}

/// Trait for AI clients.
///
/// Implementations should be stateless and thread-safe. One value serves
/// both outbound concerns of the scan pipeline: the constrained extraction
/// call and the two image-generation calls.
#[async_trait]
pub trait AiClient: Send + Sync + fmt::Debug {
    /// Issue the extraction request. Returns the raw arguments JSON of the
    /// structured call, or `None` when the model produced no structured
    /// output at all (free-form prose, refusal, empty reply).
    async fn extract(&self, request: ExtractRequest) -> Result<Option<String>, AiError>;

    /// Generate one image from a free-text prompt. Returns decoded PNG
    /// bytes; a response without an image payload is an error.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AiError>;

    /// Provider name (e.g. "openai", "fake").
    fn provider_name(&self) -> &'static str;
}

/// Create a client from environment configuration.
///
/// - `VITADEX_AI_PROVIDER`: "openai" | "fake" (default "fake")
/// - `OPENAI_API_KEY`: API key, required for "openai"
/// - `VITADEX_VISION_MODEL`: extraction model (default "gpt-4o")
/// - `VITADEX_IMAGE_MODEL`: image model (default "dall-e-2")
/// - `VITADEX_AI_BASE_URL`: optional OpenAI-compatible base URL
pub fn create_client_from_env() -> Result<Arc<dyn AiClient>, AiError> {
    let provider = std::env::var("VITADEX_AI_PROVIDER").unwrap_or_else(|_| "fake".to_string());

    match provider.as_str() {
        "fake" => Ok(Arc::new(FakeAiClient::default())),
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .map_err(|_| AiError::NotConfigured("OPENAI_API_KEY not set".to_string()))?;
            let vision_model =
                std::env::var("VITADEX_VISION_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());
            let image_model =
                std::env::var("VITADEX_IMAGE_MODEL").unwrap_or_else(|_| "dall-e-2".to_string());
            let base_url = std::env::var("VITADEX_AI_BASE_URL").ok();
            Ok(Arc::new(OpenAiClient::new(
                api_key,
                vision_model,
                image_model,
                base_url,
            )))
        }
        other => Err(AiError::NotConfigured(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
