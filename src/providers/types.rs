use serde::{Serialize, Deserialize};

use crate::errors::{LlmError, LlmResult};

/// Provider families the library can dispatch to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderType {
    Anthropic,
    OpenAI,
    Google,
    Cohere,
}

impl ProviderType {
    /// All provider families, in no particular order
    pub fn all() -> [ProviderType; 4] {
        [
            ProviderType::Anthropic,
            ProviderType::OpenAI,
            ProviderType::Google,
            ProviderType::Cohere,
        ]
    }

    /// Parse a provider family from its configuration name
    pub fn parse(s: &str) -> LlmResult<Self> {
        match s.to_lowercase().as_str() {
            "anthropic" => Ok(ProviderType::Anthropic),
            "openai" => Ok(ProviderType::OpenAI),
            "google" => Ok(ProviderType::Google),
            "cohere" => Ok(ProviderType::Cohere),
            other => Err(LlmError::ConfigError(format!(
                "Unknown provider type '{}'. Valid types: anthropic, openai, google, cohere",
                other
            ))),
        }
    }

    /// Conventional environment variable holding this family's API key
    pub fn env_key(&self) -> &'static str {
        match self {
            ProviderType::Anthropic => "ANTHROPIC_API_KEY",
            ProviderType::OpenAI => "OPENAI_API_KEY",
            ProviderType::Google => "GOOGLE_API_KEY",
            ProviderType::Cohere => "COHERE_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Anthropic => write!(f, "Anthropic"),
            ProviderType::OpenAI => write!(f, "OpenAI"),
            ProviderType::Google => write!(f, "Google"),
            ProviderType::Cohere => write!(f, "Cohere"),
        }
    }
}

/// A single generation call as handed to a provider implementation.
///
/// `model` is the provider-native model identifier, already resolved
/// from the registry key by the caller.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Normalized provider response
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
    /// Billed amount in USD when the provider reports it directly.
    /// Most vendor APIs do not; cost is then derived from usage and
    /// registry pricing by the executor.
    pub cost: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
