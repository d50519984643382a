use crate::providers::provider::{LlmProvider, BaseProvider};
use crate::providers::types::{LlmRequest, LlmResponse, ProviderType, TokenUsage};
use crate::errors::{LlmError, LlmResult};
use crate::constants;

use async_trait::async_trait;
use reqwest::header;
use serde::{Serialize, Deserialize};

/// Provider implementation for Google's Gemini AI models
pub struct GoogleProvider {
    base: BaseProvider,
}

/// Request structure for Google's Gemini API
#[derive(Serialize)]
struct GoogleGenerateContentRequest {
    contents: Vec<GoogleContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "generationConfig")]
    generation_config: Option<GoogleGenerationConfig>,
}

/// Content structure for Google's Gemini API messages
#[derive(Serialize, Deserialize)]
struct GoogleContent {
    role: String,
    parts: Vec<GooglePart>,
}

/// Individual content part for Google's Gemini API
#[derive(Serialize, Deserialize)]
struct GooglePart {
    text: String,
}

/// Generation configuration for Google's Gemini API
#[derive(Serialize, Default)]
struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: Option<u32>,
}

/// Response structure from Google's Gemini API
#[derive(Deserialize)]
struct GoogleGenerateContentResponse {
    candidates: Vec<GoogleCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GoogleUsageMetadata>,
}

/// Individual candidate from Google's Gemini API response
#[derive(Deserialize)]
struct GoogleCandidate {
    content: GoogleContent,
}

/// Token accounting from Google's Gemini API response
#[derive(Deserialize)]
struct GoogleUsageMetadata {
    #[serde(rename = "promptTokenCount")]
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(rename = "candidatesTokenCount")]
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(rename = "totalTokenCount")]
    #[serde(default)]
    total_token_count: u32,
}

impl GoogleProvider {
    pub fn new(api_key: String) -> Self {
        let base = BaseProvider::new("google".to_string(), api_key);
        Self { base }
    }
}

#[async_trait]
impl LlmProvider for GoogleProvider {
    async fn generate(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            constants::GOOGLE_API_ENDPOINT_PREFIX,
            request.model,
            self.base.api_key()
        );

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let mut generation_config = GoogleGenerationConfig::default();
        generation_config.temperature = request.temperature;
        generation_config.max_output_tokens = request.max_tokens;

        let google_request = GoogleGenerateContentRequest {
            contents: vec![GoogleContent {
                role: "user".to_string(),
                parts: vec![GooglePart { text: request.prompt.clone() }],
            }],
            generation_config: Some(generation_config).filter(|gc| {
                gc.temperature.is_some() || gc.max_output_tokens.is_some()
            }),
        };

        let response = self.base.client()
            .post(&url)
            .headers(headers)
            .json(&google_request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::from_api_response(
                status,
                format!("Google API error: {}", error_text),
            ));
        }

        let google_response: GoogleGenerateContentResponse = response.json().await
            .map_err(|e| LlmError::ApiError(format!("Failed to parse Google JSON response: {}", e)))?;

        let candidate = google_response.candidates.into_iter().next()
            .ok_or_else(|| LlmError::ApiError("No candidates in Google response".to_string()))?;

        let text = candidate.content.parts.iter()
            .map(|p| p.text.clone())
            .collect::<Vec<String>>()
            .join("");

        let usage = google_response.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(LlmResponse {
            content: text,
            model: request.model.clone(),
            usage,
            cost: None,
        })
    }

    fn name(&self) -> &str {
        self.base.name()
    }

    fn provider_type(&self) -> ProviderType {
        ProviderType::Google
    }
}
