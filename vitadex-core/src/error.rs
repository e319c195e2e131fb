use thiserror::Error;

/// Error type for AI transport operations.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("AI provider not configured: {0}")]
    NotConfigured(String),
}

/// Terminal failures of the metadata extraction step.
///
/// Neither variant is repaired or retried locally; the request fails and
/// nothing is persisted.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The model answered without the required structured call.
    #[error("extraction returned no structured output")]
    Empty,

    /// A structured call was present but its arguments failed the schema.
    #[error("extraction response did not match schema: {0}")]
    Malformed(String),

    #[error(transparent)]
    Ai(#[from] AiError),
}

/// Terminal failure of the image synthesis step.
#[derive(Debug, Error)]
pub enum SynthError {
    /// One of the two generation calls failed or returned no payload.
    #[error("image generation failed: {0}")]
    Generation(String),
}

/// Record store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store error: {0}")]
    Backend(String),
}

/// Everything that can end a scan request after input validation.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    ImageGeneration(#[from] SynthError),

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}
