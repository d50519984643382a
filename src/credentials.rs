//! API key lookup for provider families.
//!
//! Keys are read once at construction; availability checks afterwards
//! are pure map lookups with no side effects and no network traffic.

use std::collections::HashMap;
use std::env;

use log::debug;

use crate::providers::ProviderType;

/// Read-only store of provider API keys
#[derive(Debug, Clone, Default)]
pub struct CredentialStore {
    keys: HashMap<ProviderType, String>,
}

impl CredentialStore {
    /// Creates a store with no credentials configured
    pub fn empty() -> Self {
        Self { keys: HashMap::new() }
    }

    /// Reads the conventional environment variable for every provider
    /// family (ANTHROPIC_API_KEY, OPENAI_API_KEY, GOOGLE_API_KEY,
    /// COHERE_API_KEY). Empty values are treated as absent.
    pub fn from_env() -> Self {
        let mut store = Self::empty();
        for provider in ProviderType::all() {
            match env::var(provider.env_key()) {
                Ok(key) if !key.trim().is_empty() => {
                    debug!("Found {} for {}", provider.env_key(), provider);
                    store.keys.insert(provider, key);
                }
                _ => {}
            }
        }
        store
    }

    /// Sets the key for a provider family explicitly
    pub fn insert(&mut self, provider: ProviderType, key: impl Into<String>) {
        let key = key.into();
        if !key.trim().is_empty() {
            self.keys.insert(provider, key);
        }
    }

    /// Whether a provider family has a usable key
    pub fn is_available(&self, provider: ProviderType) -> bool {
        self.keys.contains_key(&provider)
    }

    pub fn key_for(&self, provider: ProviderType) -> Option<&str> {
        self.keys.get(&provider).map(String::as_str)
    }

    /// Provider families with a configured key
    pub fn available_providers(&self) -> Vec<ProviderType> {
        ProviderType::all()
            .into_iter()
            .filter(|p| self.is_available(*p))
            .collect()
    }
}
