use crate::providers::types::{LlmRequest, LlmResponse, ProviderType};
use crate::providers::anthropic::AnthropicProvider;
use crate::providers::openai::OpenAIProvider;
use crate::providers::google::GoogleProvider;
use crate::providers::cohere::CohereProvider;
use crate::errors::{LlmError, LlmResult};
use crate::constants;
use std::sync::Arc;

use async_trait::async_trait;
use std::time::Duration;
use reqwest::Client;

/// Common interface every provider family implements.
///
/// Implementations are thin HTTP clients over the vendor API that
/// normalize results into [`LlmResponse`].
#[async_trait]
pub trait LlmProvider {
    async fn generate(&self, request: &LlmRequest) -> LlmResult<LlmResponse>;
    fn name(&self) -> &str;
    fn provider_type(&self) -> ProviderType;

    /// Billed amount for a failed call, when the vendor charges for it.
    ///
    /// None means no billing is known for failures. Providers that
    /// charge partial token consumption on errors override this.
    fn failure_cost(&self, _error: &LlmError) -> Option<f64> {
        None
    }
}

pub struct BaseProvider {
    name: String,
    client: Client,
    api_key: String,
}

impl BaseProvider {
    pub fn new(name: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(constants::HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self { name, client, api_key }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

pub fn create_provider(provider_type: ProviderType, api_key: String) -> Arc<dyn LlmProvider + Send + Sync> {
    match provider_type {
        ProviderType::Anthropic => Arc::new(AnthropicProvider::new(api_key)),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(api_key)),
        ProviderType::Google => Arc::new(GoogleProvider::new(api_key)),
        ProviderType::Cohere => Arc::new(CohereProvider::new(api_key)),
    }
}
