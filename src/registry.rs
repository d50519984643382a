//! Static model registry.
//!
//! Maps short model keys (the identifiers callers put in a fallback
//! list) to a provider family, the provider-native model id, a display
//! name, and optional indicative pricing. The registry is built once at
//! startup and never mutated afterwards.

use std::collections::HashMap;

use crate::providers::{ProviderType, TokenUsage};

/// Indicative per-model pricing in USD per million tokens.
///
/// Prices drift; these are not maintained as a billing source of truth.
/// Entries without pricing simply produce no cost figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input_per_mtok: f64,
    pub output_per_mtok: f64,
}

impl ModelPricing {
    pub fn new(input_per_mtok: f64, output_per_mtok: f64) -> Self {
        Self { input_per_mtok, output_per_mtok }
    }

    /// Cost in USD for a reported token usage
    pub fn cost(&self, usage: &TokenUsage) -> f64 {
        (usage.prompt_tokens as f64 * self.input_per_mtok
            + usage.completion_tokens as f64 * self.output_per_mtok)
            / 1_000_000.0
    }
}

/// One registry entry: where a model key dispatches to
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub provider: ProviderType,
    pub model_id: String,
    pub display_name: String,
    pub pricing: Option<ModelPricing>,
}

impl ModelEntry {
    pub fn new(
        provider: ProviderType,
        model_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            model_id: model_id.into(),
            display_name: display_name.into(),
            pricing: None,
        }
    }

    pub fn with_pricing(mut self, input_per_mtok: f64, output_per_mtok: f64) -> Self {
        self.pricing = Some(ModelPricing::new(input_per_mtok, output_per_mtok));
        self
    }

    /// Derive the cost of a call from its token usage, if this entry
    /// carries pricing
    pub fn cost_for(&self, usage: Option<&TokenUsage>) -> Option<f64> {
        match (self.pricing, usage) {
            (Some(pricing), Some(usage)) => Some(pricing.cost(usage)),
            _ => None,
        }
    }
}

/// Read-only mapping from model key to provider invocation target
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: HashMap<String, ModelEntry>,
}

impl ModelRegistry {
    /// Creates an empty registry
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Creates a registry with the built-in model table
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();

        // Anthropic
        registry.insert(
            "claude-3-5-sonnet",
            ModelEntry::new(ProviderType::Anthropic, "claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet")
                .with_pricing(3.0, 15.0),
        );
        registry.insert(
            "claude-3-haiku",
            ModelEntry::new(ProviderType::Anthropic, "claude-3-haiku-20240307", "Claude 3 Haiku")
                .with_pricing(0.25, 1.25),
        );

        // OpenAI
        registry.insert(
            "gpt-4o",
            ModelEntry::new(ProviderType::OpenAI, "gpt-4o", "GPT-4o")
                .with_pricing(2.5, 10.0),
        );
        registry.insert(
            "gpt-4o-mini",
            ModelEntry::new(ProviderType::OpenAI, "gpt-4o-mini", "GPT-4o Mini")
                .with_pricing(0.15, 0.6),
        );
        registry.insert(
            "gpt-4-turbo",
            ModelEntry::new(ProviderType::OpenAI, "gpt-4-turbo", "GPT-4 Turbo")
                .with_pricing(10.0, 30.0),
        );

        // Other providers
        registry.insert(
            "cohere-command-r-plus",
            ModelEntry::new(ProviderType::Cohere, "command-r-plus", "Cohere Command R+")
                .with_pricing(2.5, 10.0),
        );
        registry.insert(
            "gemini-1-5-pro",
            ModelEntry::new(ProviderType::Google, "gemini-1.5-pro", "Gemini 1.5 Pro")
                .with_pricing(1.25, 5.0),
        );

        registry
    }

    /// Add or replace an entry
    pub fn insert(&mut self, key: impl Into<String>, entry: ModelEntry) {
        self.entries.insert(key.into(), entry);
    }

    /// Look up the invocation target for a model key
    pub fn resolve(&self, key: &str) -> Option<&ModelEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// All registered model keys, sorted for stable listing
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
