use crate::providers::provider::{LlmProvider, BaseProvider};
use crate::providers::types::{LlmRequest, LlmResponse, ProviderType, TokenUsage};
use crate::errors::{LlmError, LlmResult};
use crate::constants;

use async_trait::async_trait;
use reqwest::header;
use serde::{Serialize, Deserialize};

/// Provider implementation for OpenAI's API (GPT models)
pub struct OpenAIProvider {
    base: BaseProvider,
}

/// Request structure for OpenAI's chat completion API
#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    content: String,
}

/// Response structure from OpenAI's chat completion API
#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    model: String,
    usage: Option<OpenAIUsage>,
}

/// Individual choice from OpenAI's response
#[derive(Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
}

/// Token usage information from OpenAI
#[derive(Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

impl OpenAIProvider {
    pub fn new(api_key: String) -> Self {
        let base = BaseProvider::new("openai".to_string(), api_key);
        Self { base }
    }

    /// Build request headers for OpenAI API
    fn build_headers(&self) -> LlmResult<header::HeaderMap> {
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
        Ok(headers)
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    async fn generate(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let headers = self.build_headers()?;

        let openai_request = OpenAIRequest {
            model: request.model.clone(),
            messages: vec![OpenAIMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self.base.client()
            .post(constants::OPENAI_API_ENDPOINT)
            .headers(headers)
            .json(&openai_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::from_api_response(
                status,
                format!("OpenAI API error: {}", error_text),
            ));
        }

        let openai_response: OpenAIResponse = response.json().await?;

        let choice = openai_response.choices.into_iter().next()
            .ok_or_else(|| LlmError::ApiError("No response from OpenAI".to_string()))?;

        let usage = openai_response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(LlmResponse {
            content: choice.message.content,
            model: openai_response.model,
            usage,
            cost: None,
        })
    }

    fn name(&self) -> &str {
        self.base.name()
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::OpenAI
    }
}
