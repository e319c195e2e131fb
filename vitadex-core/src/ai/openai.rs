//! OpenAI-backed AI client.

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionNamedToolChoice, ChatCompletionRequestMessage,
        ChatCompletionRequestMessageContentPartImageArgs,
        ChatCompletionRequestMessageContentPartTextArgs, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContentPart,
        ChatCompletionToolArgs, ChatCompletionToolChoiceOption, ChatCompletionToolType,
        CreateChatCompletionRequestArgs, FunctionName, FunctionObjectArgs, ImageUrlArgs,
    },
    types::images::{CreateImageRequestArgs, Image, ImageModel, ImageResponseFormat, ImageSize},
    Client,
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;

use super::{AiClient, AiError, ExtractRequest};

/// Client for the OpenAI chat (vision + structured calls) and images APIs.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    vision_model: String,
    image_model: String,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("vision_model", &self.vision_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a new client. `base_url` overrides the API base for
    /// OpenAI-compatible gateways.
    pub fn new(
        api_key: String,
        vision_model: String,
        image_model: String,
        base_url: Option<String>,
    ) -> Self {
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(base) = base_url {
            config = config.with_api_base(base);
        }

        Self {
            client: Client::with_config(config),
            vision_model,
            image_model,
        }
    }

    fn build_messages(
        request: &ExtractRequest,
    ) -> Result<Vec<ChatCompletionRequestMessage>, AiError> {
        let mut parts: Vec<ChatCompletionRequestUserMessageContentPart> =
            vec![ChatCompletionRequestMessageContentPartTextArgs::default()
                .text(request.user_text.clone())
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build text part: {}", e)))?
                .into()];

        if let Some(image) = &request.image {
            let image_url = ImageUrlArgs::default()
                .url(format!(
                    "data:{};base64,{}",
                    image.media_type, image.base64
                ))
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build image url: {}", e)))?;

            parts.push(
                ChatCompletionRequestMessageContentPartImageArgs::default()
                    .image_url(image_url)
                    .build()
                    .map_err(|e| AiError::Api(format!("Failed to build image part: {}", e)))?
                    .into(),
            );
        }

        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.clone())
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build system message: {}", e)))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(parts)
                .build()
                .map_err(|e| AiError::Api(format!("Failed to build user message: {}", e)))?
                .into(),
        ])
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn extract(&self, request: ExtractRequest) -> Result<Option<String>, AiError> {
        let messages = Self::build_messages(&request)?;

        let tool = ChatCompletionToolArgs::default()
            .r#type(ChatCompletionToolType::Function)
            .function(
                FunctionObjectArgs::default()
                    .name(request.tool.name)
                    .description(request.tool.description)
                    .parameters(request.tool.parameters.clone())
                    .build()
                    .map_err(|e| AiError::Api(format!("Failed to build tool: {}", e)))?,
            )
            .build()
            .map_err(|e| AiError::Api(format!("Failed to build tool: {}", e)))?;

        // Force the named call so the model cannot answer in prose.
        let openai_request = CreateChatCompletionRequestArgs::default()
            .model(&self.vision_model)
            .messages(messages)
            .tools(vec![tool])
            .tool_choice(ChatCompletionToolChoiceOption::Named(
                ChatCompletionNamedToolChoice {
                    r#type: ChatCompletionToolType::Function,
                    function: FunctionName {
                        name: request.tool.name.to_string(),
                    },
                },
            ))
            .max_completion_tokens(4096u32)
            .temperature(0.1)
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        tracing::debug!(model = %self.vision_model, tool = request.tool.name, "Calling extraction model");

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let arguments = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls)
            .and_then(|calls| calls.into_iter().next())
            .map(|call| call.function.arguments);

        Ok(arguments)
    }

    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, AiError> {
        let request = CreateImageRequestArgs::default()
            .prompt(prompt)
            .model(ImageModel::Other(self.image_model.clone()))
            .n(1)
            .response_format(ImageResponseFormat::B64Json)
            .size(ImageSize::S512x512)
            .build()
            .map_err(|e| AiError::Api(e.to_string()))?;

        tracing::debug!(model = %self.image_model, "Calling image model");

        let response = self
            .client
            .images()
            .create(request)
            .await
            .map_err(|e| AiError::RequestFailed(e.to_string()))?;

        let image = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| AiError::ParseError("No image in response".to_string()))?;

        match image.as_ref() {
            Image::B64Json { b64_json, .. } => BASE64
                .decode(b64_json.as_bytes())
                .map_err(|e| AiError::ParseError(format!("Invalid base64 image payload: {}", e))),
            Image::Url { .. } => Err(AiError::ParseError(
                "Expected base64 image payload, got url".to_string(),
            )),
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
