use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::config::{self, Config};
use crate::credentials::CredentialStore;
use crate::errors::LlmResult;
use crate::fallback::attempts::{AttemptRecord, FallbackResponse};
use crate::fallback::request::GenerationRequest;
use crate::providers::{create_provider, LlmProvider, LlmRequest, ProviderType};
use crate::registry::ModelRegistry;

/// Walks a request's fallback list in order and returns the first
/// success, recording every attempt along the way.
///
/// The executor is stateless between `process()` calls: it only holds
/// the registry and the provider clients, both read-only after
/// construction, so independent calls may run concurrently.
pub struct FallbackExecutor {
    registry: ModelRegistry,
    providers: HashMap<ProviderType, Arc<dyn LlmProvider + Send + Sync>>,
    deadline: Option<Duration>,
}

impl FallbackExecutor {
    /// Creates an executor over the given registry, building a provider
    /// client for every family with a configured credential.
    pub fn new(registry: ModelRegistry, credentials: CredentialStore) -> Self {
        let mut providers: HashMap<ProviderType, Arc<dyn LlmProvider + Send + Sync>> =
            HashMap::new();
        for provider_type in ProviderType::all() {
            if let Some(key) = credentials.key_for(provider_type) {
                providers.insert(provider_type, create_provider(provider_type, key.to_string()));
            }
        }
        info!(
            "Executor initialized: {} model(s) registered, {} provider(s) available",
            registry.len(),
            providers.len()
        );
        Self { registry, providers, deadline: None }
    }

    /// Creates an executor with the built-in model table and
    /// credentials read from the environment
    pub fn with_defaults() -> Self {
        Self::new(ModelRegistry::with_defaults(), CredentialStore::from_env())
    }

    /// Creates an executor from a TOML configuration string
    pub fn from_config_str(content: &str) -> LlmResult<Self> {
        let config = config::parse_config(content)?;
        Self::from_config(config)
    }

    /// Creates an executor from a TOML configuration file
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> LlmResult<Self> {
        let config = config::load_config(path)?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> LlmResult<Self> {
        let registry = config.build_registry()?;
        let credentials = config.build_credentials()?;
        let mut executor = Self::new(registry, credentials);
        if let Some(secs) = config.settings.deadline_secs {
            executor.deadline = Some(Duration::from_secs(secs));
        }
        Ok(executor)
    }

    /// Injects a provider implementation, replacing any client built
    /// for that family. Used for custom transports and in tests.
    pub fn with_provider(mut self, provider: Arc<dyn LlmProvider + Send + Sync>) -> Self {
        self.providers.insert(provider.provider_type(), provider);
        self
    }

    /// Bounds one `process()` call overall. When the deadline elapses
    /// the candidate loop is truncated and the attempts made so far are
    /// returned in a failure response.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Provider families this executor can currently dispatch to
    pub fn available_providers(&self) -> Vec<ProviderType> {
        ProviderType::all()
            .into_iter()
            .filter(|p| self.providers.contains_key(p))
            .collect()
    }

    /// Processes one request against its fallback list.
    ///
    /// Candidates are tried strictly in list order, one at a time. The
    /// first success terminates the loop. Resolution failures, missing
    /// credentials and dispatch errors each eliminate only their own
    /// candidate; this function itself never fails.
    pub async fn process(&self, request: &GenerationRequest) -> FallbackResponse {
        let request_id = request.request_id.as_deref().unwrap_or("unassigned");
        info!(
            "Processing request {} with {} candidate(s): {:?}",
            request_id,
            request.models.len(),
            request.models
        );

        let started = Instant::now();
        let mut attempts: Vec<AttemptRecord> = Vec::new();

        for (position, model_key) in request.models.iter().enumerate() {
            if let Some(deadline) = self.deadline {
                if started.elapsed() >= deadline {
                    warn!(
                        "Request {}: deadline of {:?} elapsed after {} attempt(s), truncating",
                        request_id,
                        deadline,
                        attempts.len()
                    );
                    return FallbackResponse::failed(
                        format!(
                            "deadline of {:?} elapsed after {} of {} candidates",
                            deadline,
                            attempts.len(),
                            request.models.len()
                        ),
                        attempts,
                    );
                }
            }

            if position == 0 {
                debug!("Request {}: primary model '{}'", request_id, model_key);
            } else {
                debug!("Request {}: fallback #{} '{}'", request_id, position, model_key);
            }

            let entry = match self.registry.resolve(model_key) {
                Some(entry) => entry,
                None => {
                    warn!("Request {}: unknown model '{}'", request_id, model_key);
                    attempts.push(AttemptRecord::failure(
                        model_key,
                        model_key,
                        format!("unknown model '{}'", model_key),
                        0,
                        None,
                    ));
                    continue;
                }
            };

            // Cheap availability check; no network traffic for
            // providers that were never configured
            let provider = match self.providers.get(&entry.provider) {
                Some(provider) => provider,
                None => {
                    warn!(
                        "Request {}: provider {} unavailable for '{}'",
                        request_id, entry.provider, model_key
                    );
                    attempts.push(AttemptRecord::failure(
                        model_key,
                        &entry.display_name,
                        format!("provider unavailable: {}", entry.provider),
                        0,
                        None,
                    ));
                    continue;
                }
            };

            let llm_request = LlmRequest {
                model: entry.model_id.clone(),
                prompt: request.prompt.clone(),
                max_tokens: request.max_tokens,
                temperature: request.temperature,
            };

            info!("Request {}: trying {}...", request_id, entry.display_name);
            let attempt_started = Instant::now();
            let result = self.dispatch(provider.as_ref(), &llm_request, started).await;
            let latency_ms = attempt_started.elapsed().as_millis() as u64;

            match result {
                Ok(response) => {
                    // Prefer a provider-reported amount over derived pricing
                    let cost = response.cost.or_else(|| entry.cost_for(response.usage.as_ref()));
                    info!(
                        "Request {}: {} succeeded in {}ms",
                        request_id, entry.display_name, latency_ms
                    );
                    attempts.push(AttemptRecord::success(
                        model_key,
                        &entry.display_name,
                        latency_ms,
                        cost,
                    ));
                    return FallbackResponse::succeeded(
                        response.content,
                        model_key.clone(),
                        response.usage,
                        attempts,
                    );
                }
                Err(e) => {
                    let message = format!("{} failed: {}", entry.display_name, e);
                    error!("Request {}: {}", request_id, message);
                    attempts.push(AttemptRecord::failure(
                        model_key,
                        &entry.display_name,
                        message,
                        latency_ms,
                        provider.failure_cost(&e),
                    ));
                }
            }
        }

        let message = format!("all {} candidate model(s) exhausted", request.models.len());
        error!("Request {}: {}", request_id, message);
        FallbackResponse::failed(message, attempts)
    }

    /// Processes a batch of requests one after another
    pub async fn process_many(&self, requests: Vec<GenerationRequest>) -> Vec<FallbackResponse> {
        let mut responses = Vec::with_capacity(requests.len());
        for request in &requests {
            responses.push(self.process(request).await);
        }
        responses
    }

    /// One provider dispatch, bounded by the remaining deadline budget
    /// when a deadline is set
    async fn dispatch(
        &self,
        provider: &(dyn LlmProvider + Send + Sync),
        request: &LlmRequest,
        started: Instant,
    ) -> LlmResult<crate::providers::LlmResponse> {
        match self.deadline {
            Some(deadline) => {
                let remaining = deadline.saturating_sub(started.elapsed());
                match tokio::time::timeout(remaining, provider.generate(request)).await {
                    Ok(result) => result,
                    Err(_) => Err(crate::errors::LlmError::ApiError(format!(
                        "dispatch cut off by overall deadline of {:?}",
                        deadline
                    ))),
                }
            }
            None => provider.generate(request).await,
        }
    }
}
