//! Configuration types for TOML-based configuration.
//!
//! These types map directly to the TOML configuration file structure.

use std::collections::HashMap;

use serde::Deserialize;

use crate::credentials::CredentialStore;
use crate::errors::{LlmError, LlmResult};
use crate::providers::ProviderType;
use crate::registry::{ModelEntry, ModelRegistry};

/// Root configuration structure.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Global executor settings.
    #[serde(default)]
    pub settings: Settings,

    /// Provider API keys, keyed by provider name. Values support the
    /// `${VAR_NAME}` environment variable syntax.
    #[serde(default)]
    pub credentials: HashMap<String, String>,

    /// Additional model registry entries, extending or overriding the
    /// built-in table.
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

/// Global executor settings.
#[derive(Debug, Deserialize, Default)]
pub struct Settings {
    /// Overall wall-clock budget for one process() call, in seconds.
    /// Absent means no deadline.
    pub deadline_secs: Option<u64>,
}

/// One registry entry in configuration form.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Model key used in fallback lists.
    pub key: String,

    /// Provider family: "anthropic", "openai", "google", or "cohere".
    pub provider: String,

    /// Provider-native model identifier (e.g. "gpt-4o").
    pub id: String,

    /// Display name for logs and listings; defaults to the key.
    pub name: Option<String>,

    /// USD per million input tokens. Must be paired with
    /// `output_per_mtok`.
    pub input_per_mtok: Option<f64>,

    /// USD per million output tokens. Must be paired with
    /// `input_per_mtok`.
    pub output_per_mtok: Option<f64>,
}

impl Config {
    /// Builds the model registry: the built-in table plus this
    /// configuration's entries, with configured keys taking precedence.
    pub fn build_registry(&self) -> LlmResult<ModelRegistry> {
        let mut registry = ModelRegistry::with_defaults();
        for model in &self.models {
            let provider = ProviderType::parse(&model.provider)?;
            let display_name = model.name.clone().unwrap_or_else(|| model.key.clone());
            let mut entry = ModelEntry::new(provider, model.id.clone(), display_name);
            if let (Some(input), Some(output)) = (model.input_per_mtok, model.output_per_mtok) {
                entry = entry.with_pricing(input, output);
            }
            registry.insert(model.key.clone(), entry);
        }
        Ok(registry)
    }

    /// Builds the credential store: environment variables first, then
    /// this configuration's explicit keys on top.
    pub fn build_credentials(&self) -> LlmResult<CredentialStore> {
        let mut store = CredentialStore::from_env();
        for (provider_name, key) in &self.credentials {
            let provider = ProviderType::parse(provider_name).map_err(|_| {
                LlmError::ConfigError(format!(
                    "Unknown provider '{}' in [credentials]",
                    provider_name
                ))
            })?;
            store.insert(provider, key.clone());
        }
        Ok(store)
    }
}
