use crate::providers::provider::{LlmProvider, BaseProvider};
use crate::providers::types::{LlmRequest, LlmResponse, ProviderType, TokenUsage};
use crate::errors::{LlmError, LlmResult};
use crate::constants;

use async_trait::async_trait;
use reqwest::header;
use serde::{Serialize, Deserialize};

/// Provider implementation for Cohere's API (v2)
///
/// API endpoint: https://api.cohere.com/v2/chat
/// Uses Bearer token authentication.
pub struct CohereProvider {
    base: BaseProvider,
}

/// Message format for Cohere v2 API
#[derive(Serialize)]
struct CohereMessage {
    role: String,
    content: String,
}

/// Request structure for Cohere's v2 chat API
#[derive(Serialize)]
struct CohereRequest {
    model: String,
    messages: Vec<CohereMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

/// Response structure from Cohere's v2 chat API
#[derive(Deserialize)]
struct CohereResponse {
    message: CohereResponseMessage,
    #[serde(default)]
    usage: Option<CohereUsage>,
}

#[derive(Deserialize)]
struct CohereResponseMessage {
    content: Vec<CohereContentBlock>,
}

#[derive(Deserialize)]
struct CohereContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: Option<String>,
}

/// Token usage information from Cohere
///
/// Cohere v2 reports both raw token counts and billed units; billed
/// units take precedence since they reflect what is actually charged.
#[derive(Deserialize)]
struct CohereUsage {
    #[serde(default)]
    billed_units: Option<CohereTokenCounts>,
    #[serde(default)]
    tokens: Option<CohereTokenCounts>,
}

#[derive(Deserialize)]
struct CohereTokenCounts {
    #[serde(default)]
    input_tokens: Option<u32>,
    #[serde(default)]
    output_tokens: Option<u32>,
}

impl CohereProvider {
    pub fn new(api_key: String) -> Self {
        let base = BaseProvider::new("cohere".to_string(), api_key);
        Self { base }
    }

    /// Extract text content from Cohere's response content blocks
    fn extract_content(content_blocks: &[CohereContentBlock]) -> String {
        content_blocks
            .iter()
            .filter_map(|block| {
                if block.content_type == "text" {
                    block.text.clone()
                } else {
                    None
                }
            })
            .collect::<Vec<String>>()
            .join("")
    }

    fn map_usage(usage: CohereUsage) -> Option<TokenUsage> {
        let counts = usage.billed_units.or(usage.tokens)?;
        let input = counts.input_tokens?;
        let output = counts.output_tokens?;
        Some(TokenUsage {
            prompt_tokens: input,
            completion_tokens: output,
            total_tokens: input + output,
        })
    }
}

#[async_trait]
impl LlmProvider for CohereProvider {
    async fn generate(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", self.base.api_key()))
                .map_err(|e| LlmError::ConfigError(format!("Invalid API key format: {}", e)))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let cohere_request = CohereRequest {
            model: request.model.clone(),
            messages: vec![CohereMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        };

        let response = self.base.client()
            .post(constants::COHERE_API_ENDPOINT)
            .headers(headers)
            .json(&cohere_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| format!("Unknown error. Status: {}", status));
            return Err(LlmError::from_api_response(
                status,
                format!("Cohere API error: {}", error_text),
            ));
        }

        let response_text = response.text().await?;
        if response_text.is_empty() {
            return Err(LlmError::ApiError(
                "Received empty response body from Cohere".to_string(),
            ));
        }

        let cohere_response: CohereResponse = serde_json::from_str(&response_text)
            .map_err(|e| LlmError::ApiError(format!("Failed to parse Cohere JSON response: {}", e)))?;

        let content = Self::extract_content(&cohere_response.message.content);
        let usage = cohere_response.usage.and_then(Self::map_usage);

        Ok(LlmResponse {
            content,
            model: request.model.clone(),
            usage,
            cost: None,
        })
    }

    fn name(&self) -> &str {
        self.base.name()
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Cohere
    }
}
