use serde::{Serialize, Deserialize};
use serde_json::Value;

use crate::errors::{LlmError, LlmResult};

/// A generation request with an ordered fallback list.
///
/// The first model in `models` is the primary; the rest are tried in
/// order when earlier candidates fail. The list encodes the whole
/// routing policy: quality-first, cost-first or single-provider
/// orderings are all just different lists.
///
/// Model keys are validated lazily: an identifier the registry does not
/// know is a per-attempt failure during processing, not a construction
/// error.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationRequest {
    pub prompt: String,
    pub models: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Correlation id, auto-generated when not supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl GenerationRequest {
    /// Creates a validated request from a prompt and fallback list
    pub fn new(prompt: impl Into<String>, models: Vec<String>) -> LlmResult<Self> {
        Self::builder(prompt).models(models).build()
    }

    /// Creates a builder for a GenerationRequest.
    pub fn builder(prompt: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder {
            prompt: prompt.into(),
            models: Vec::new(),
            max_tokens: None,
            temperature: None,
            request_id: None,
        }
    }

    /// Parses a request from its JSON representation
    pub fn from_json(json_str: &str) -> LlmResult<Self> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| LlmError::ParseError(format!("Malformed request JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// Parses a request from an already-deserialized JSON value
    pub fn from_value(value: Value) -> LlmResult<Self> {
        let request: GenerationRequest = serde_json::from_value(value)
            .map_err(|e| LlmError::ParseError(format!("Invalid request structure: {}", e)))?;
        request.finalize()
    }

    /// Serializes the request to pretty-printed JSON
    pub fn to_json(&self) -> LlmResult<String> {
        serde_json::to_string_pretty(self).map_err(LlmError::from)
    }

    /// The primary model (first in the list)
    pub fn primary_model(&self) -> &str {
        &self.models[0]
    }

    /// The fallback models (rest of the list)
    pub fn fallback_models(&self) -> &[String] {
        &self.models[1..]
    }

    /// Validates field constraints and fills in a generated request id.
    /// Every construction path funnels through here, so a request in
    /// caller hands is always well-formed.
    fn finalize(mut self) -> LlmResult<Self> {
        if self.prompt.trim().is_empty() {
            return Err(LlmError::ValidationError("prompt must not be empty".to_string()));
        }
        if self.models.is_empty() {
            return Err(LlmError::ValidationError("models must not be empty".to_string()));
        }
        if let Some(temp) = self.temperature {
            if !(0.0..=2.0).contains(&temp) {
                return Err(LlmError::ValidationError(format!(
                    "temperature {} outside supported range [0, 2]",
                    temp
                )));
            }
        }
        if self.request_id.is_none() {
            self.request_id = Some(generate_request_id());
        }
        Ok(self)
    }
}

/// Chainable builder for [`GenerationRequest`]
pub struct GenerationRequestBuilder {
    prompt: String,
    models: Vec<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    request_id: Option<String>,
}

impl GenerationRequestBuilder {
    /// Appends one model key to the fallback list
    pub fn model(mut self, key: impl Into<String>) -> Self {
        self.models.push(key.into());
        self
    }

    /// Replaces the fallback list wholesale
    pub fn models(mut self, models: Vec<String>) -> Self {
        self.models = models;
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Validates and finalizes the request
    pub fn build(self) -> LlmResult<GenerationRequest> {
        let request = GenerationRequest {
            prompt: self.prompt,
            models: self.models,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            request_id: self.request_id,
        };
        request.finalize()
    }
}

fn generate_request_id() -> String {
    use rand::Rng;
    format!("req-{:016x}", rand::rng().random::<u64>())
}
