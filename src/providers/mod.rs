/// Module for various LLM provider implementations
///
/// This module contains implementations for different LLM providers:
/// - Anthropic (Claude models)
/// - OpenAI (GPT models)
/// - Google (Gemini models)
/// - Cohere (Command models)
///
/// Each provider implements a common interface for generating text
/// completions through their respective APIs.

pub mod anthropic;
pub mod openai;
pub mod google;
pub mod cohere;
pub mod types;
pub mod provider;

pub use types::{ProviderType, LlmRequest, LlmResponse, TokenUsage};
pub use provider::{LlmProvider, create_provider};
pub use anthropic::AnthropicProvider;
pub use openai::OpenAIProvider;
pub use google::GoogleProvider;
pub use cohere::CohereProvider;
