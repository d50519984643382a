//! Integration tests for the fallback executor.
//!
//! Uses a scripted provider injected through `with_provider` so no
//! network traffic is involved.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relayllm::{
    AttemptStatus, CredentialStore, FallbackExecutor, GenerationRequest, LlmError, LlmProvider,
    LlmRequest, LlmResponse, LlmResult, ModelEntry, ModelRegistry, ProviderType, TokenUsage,
};

// ============================================================================
// Scripted Provider
// ============================================================================

enum Outcome {
    Succeed {
        content: &'static str,
        usage: Option<TokenUsage>,
        cost: Option<f64>,
    },
    Fail(&'static str),
}

struct ScriptedProvider {
    kind: ProviderType,
    outcomes: HashMap<String, Outcome>,
    failure_billing: Option<f64>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    fn new(kind: ProviderType) -> Self {
        Self {
            kind,
            outcomes: HashMap::new(),
            failure_billing: None,
            delay: None,
        }
    }

    fn succeed(mut self, model_id: &str, content: &'static str) -> Self {
        self.outcomes.insert(
            model_id.to_string(),
            Outcome::Succeed { content, usage: None, cost: None },
        );
        self
    }

    fn succeed_with(
        mut self,
        model_id: &str,
        content: &'static str,
        usage: Option<TokenUsage>,
        cost: Option<f64>,
    ) -> Self {
        self.outcomes.insert(
            model_id.to_string(),
            Outcome::Succeed { content, usage, cost },
        );
        self
    }

    fn fail(mut self, model_id: &str, message: &'static str) -> Self {
        self.outcomes.insert(model_id.to_string(), Outcome::Fail(message));
        self
    }

    fn bill_failures(mut self, amount: f64) -> Self {
        self.failure_billing = Some(amount);
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn generate(&self, request: &LlmRequest) -> LlmResult<LlmResponse> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.outcomes.get(&request.model) {
            Some(Outcome::Succeed { content, usage, cost }) => Ok(LlmResponse {
                content: content.to_string(),
                model: request.model.clone(),
                usage: usage.clone(),
                cost: *cost,
            }),
            Some(Outcome::Fail(message)) => Err(LlmError::ApiError(message.to_string())),
            None => Err(LlmError::ApiError(format!("unscripted model {}", request.model))),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn provider_type(&self) -> ProviderType {
        self.kind
    }

    fn failure_cost(&self, _error: &LlmError) -> Option<f64> {
        self.failure_billing
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_registry() -> ModelRegistry {
    let mut registry = ModelRegistry::empty();
    registry.insert("alpha", ModelEntry::new(ProviderType::Anthropic, "alpha-1", "Alpha"));
    registry.insert("bravo", ModelEntry::new(ProviderType::Anthropic, "bravo-1", "Bravo"));
    registry.insert("charlie", ModelEntry::new(ProviderType::Anthropic, "charlie-1", "Charlie"));
    registry.insert(
        "priced",
        ModelEntry::new(ProviderType::Anthropic, "priced-1", "Priced").with_pricing(1.0, 2.0),
    );
    registry.insert("orphan", ModelEntry::new(ProviderType::OpenAI, "orphan-1", "Orphan"));
    registry
}

fn executor_with(provider: ScriptedProvider) -> FallbackExecutor {
    FallbackExecutor::new(test_registry(), CredentialStore::empty())
        .with_provider(Arc::new(provider))
}

fn request(keys: &[&str]) -> GenerationRequest {
    GenerationRequest::new("hi", keys.iter().map(|k| k.to_string()).collect()).unwrap()
}

// ============================================================================
// First Success Wins
// ============================================================================

#[tokio::test]
async fn test_primary_success_makes_single_attempt() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .succeed("alpha-1", "from alpha")
            .succeed("bravo-1", "from bravo"),
    );

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    assert!(response.success);
    assert_eq!(response.content.as_deref(), Some("from alpha"));
    assert_eq!(response.model_used.as_deref(), Some("alpha"));
    assert_eq!(response.attempts.len(), 1);
    assert_eq!(response.attempts[0].status, AttemptStatus::Success);
}

#[tokio::test]
async fn test_fallback_reaches_third_candidate() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .fail("alpha-1", "boom")
            .fail("bravo-1", "boom")
            .succeed("charlie-1", "from charlie"),
    );

    let response = executor.process(&request(&["alpha", "bravo", "charlie"])).await;

    assert!(response.success);
    assert_eq!(response.model_used.as_deref(), Some("charlie"));
    assert_eq!(response.attempts.len(), 3);
    assert_eq!(response.attempts[0].status, AttemptStatus::Failure);
    assert_eq!(response.attempts[1].status, AttemptStatus::Failure);
    assert_eq!(response.attempts[2].status, AttemptStatus::Success);
}

#[tokio::test]
async fn test_attempt_log_preserves_input_order() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .fail("alpha-1", "boom")
            .succeed("bravo-1", "ok"),
    );

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    let tried: Vec<&str> = response.attempts.iter().map(|a| a.model.as_str()).collect();
    assert_eq!(tried, vec!["alpha", "bravo"]);
}

#[tokio::test]
async fn test_model_used_is_order_independent_but_log_is_not() {
    let build = || {
        executor_with(
            ScriptedProvider::new(ProviderType::Anthropic)
                .fail("alpha-1", "boom")
                .succeed("bravo-1", "ok"),
        )
    };

    let forward = build().process(&request(&["alpha", "bravo"])).await;
    let reverse = build().process(&request(&["bravo", "alpha"])).await;

    assert_eq!(forward.model_used, reverse.model_used);
    assert_eq!(forward.attempts.len(), 2);
    assert_eq!(reverse.attempts.len(), 1);
}

// ============================================================================
// Exhaustion
// ============================================================================

#[tokio::test]
async fn test_exhaustion_records_every_candidate() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .fail("alpha-1", "down")
            .fail("bravo-1", "down")
            .fail("charlie-1", "down"),
    );

    let response = executor.process(&request(&["alpha", "bravo", "charlie"])).await;

    assert!(!response.success);
    assert!(response.content.is_none());
    assert!(response.model_used.is_none());
    assert_eq!(response.attempts.len(), 3);
    assert!(response.attempts.iter().all(|a| a.status == AttemptStatus::Failure));
    assert!(response.error.as_deref().unwrap().contains("exhausted"));
}

// ============================================================================
// Resolution and Availability Failures
// ============================================================================

#[tokio::test]
async fn test_unknown_model_is_skipped_not_fatal() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic).succeed("bravo-1", "ok"),
    );

    let response = executor.process(&request(&["no-such-model", "bravo"])).await;

    assert!(response.success);
    assert_eq!(response.model_used.as_deref(), Some("bravo"));
    assert_eq!(response.attempts.len(), 2);
    assert_eq!(response.attempts[0].status, AttemptStatus::Failure);
    assert!(response.attempts[0].error.as_deref().unwrap().contains("unknown model"));
    assert!(response.attempts[0].cost.is_none());
}

#[tokio::test]
async fn test_unavailable_provider_is_skipped() {
    // "orphan" resolves to OpenAI, for which no provider is configured
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic).succeed("bravo-1", "ok"),
    );

    let response = executor.process(&request(&["orphan", "bravo"])).await;

    assert!(response.success);
    assert_eq!(response.attempts.len(), 2);
    assert!(response.attempts[0]
        .error
        .as_deref()
        .unwrap()
        .contains("provider unavailable"));
}

#[tokio::test]
async fn test_no_providers_at_all_exhausts() {
    let executor = FallbackExecutor::new(test_registry(), CredentialStore::empty());

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    assert!(!response.success);
    assert_eq!(response.attempts.len(), 2);
}

// ============================================================================
// Cost Accounting
// ============================================================================

#[tokio::test]
async fn test_cost_sums_billed_failures_and_success() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .fail("alpha-1", "overloaded")
            .succeed_with("bravo-1", "ok", None, Some(0.02))
            .bill_failures(0.01),
    );

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    assert!(response.success);
    assert_eq!(response.attempts[0].cost, Some(0.01));
    assert_eq!(response.attempts[1].cost, Some(0.02));
    let total = response.cost.unwrap();
    assert!((total - 0.03).abs() < 1e-9);
}

#[tokio::test]
async fn test_cost_absent_when_nothing_billed() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .fail("alpha-1", "down")
            .succeed("bravo-1", "ok"),
    );

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    assert!(response.success);
    assert!(response.cost.is_none(), "no billing reported, cost must be absent");
}

#[tokio::test]
async fn test_cost_derived_from_registry_pricing() {
    let usage = TokenUsage {
        prompt_tokens: 1000,
        completion_tokens: 500,
        total_tokens: 1500,
    };
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .succeed_with("priced-1", "ok", Some(usage.clone()), None),
    );

    let response = executor.process(&request(&["priced"])).await;

    assert!(response.success);
    assert_eq!(response.usage, Some(usage));
    // 1000 * 1.0/M + 500 * 2.0/M
    let cost = response.cost.unwrap();
    assert!((cost - 0.002).abs() < 1e-12);
}

#[tokio::test]
async fn test_provider_reported_cost_wins_over_pricing() {
    let usage = TokenUsage {
        prompt_tokens: 1000,
        completion_tokens: 500,
        total_tokens: 1500,
    };
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .succeed_with("priced-1", "ok", Some(usage), Some(0.5)),
    );

    let response = executor.process(&request(&["priced"])).await;

    assert_eq!(response.cost, Some(0.5));
}

#[tokio::test]
async fn test_exhaustion_keeps_partial_billing() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .fail("alpha-1", "down")
            .fail("bravo-1", "down")
            .bill_failures(0.01),
    );

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    assert!(!response.success);
    let total = response.cost.unwrap();
    assert!((total - 0.02).abs() < 1e-9);
}

// ============================================================================
// Default Registry Scenario
// ============================================================================

#[tokio::test]
async fn test_unknown_then_known_with_default_registry() {
    let executor = FallbackExecutor::new(ModelRegistry::with_defaults(), CredentialStore::empty())
        .with_provider(Arc::new(
            ScriptedProvider::new(ProviderType::OpenAI)
                .succeed_with("gpt-4o-mini", "hello", None, Some(0.002)),
        ));

    let request = GenerationRequest::new(
        "hi",
        vec!["bad-id".to_string(), "gpt-4o-mini".to_string()],
    )
    .unwrap();
    let response = executor.process(&request).await;

    assert!(response.success);
    assert_eq!(response.model_used.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(response.cost, Some(0.002));
    assert_eq!(response.attempts.len(), 2);
    assert_eq!(response.attempts[0].model, "bad-id");
    assert_eq!(response.attempts[0].status, AttemptStatus::Failure);
    assert_eq!(response.attempts[1].model, "gpt-4o-mini");
    assert_eq!(response.attempts[1].status, AttemptStatus::Success);
}

// ============================================================================
// Deadline
// ============================================================================

#[tokio::test]
async fn test_zero_deadline_truncates_before_any_attempt() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic).succeed("alpha-1", "ok"),
    )
    .with_deadline(Duration::ZERO);

    let response = executor.process(&request(&["alpha"])).await;

    assert!(!response.success);
    assert!(response.attempts.is_empty());
    assert!(response.error.as_deref().unwrap().contains("deadline"));
}

#[tokio::test]
async fn test_deadline_cuts_off_slow_dispatch() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .succeed("alpha-1", "too late")
            .succeed("bravo-1", "never reached")
            .with_delay(Duration::from_millis(200)),
    )
    .with_deadline(Duration::from_millis(50));

    let response = executor.process(&request(&["alpha", "bravo"])).await;

    assert!(!response.success);
    // Attempt one was cut off, attempt two never started
    assert_eq!(response.attempts.len(), 1);
    assert_eq!(response.attempts[0].status, AttemptStatus::Failure);
    assert!(response.error.as_deref().unwrap().contains("deadline"));
}

// ============================================================================
// Batch Processing
// ============================================================================

#[tokio::test]
async fn test_process_many_keeps_request_order() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic)
            .succeed("alpha-1", "first")
            .fail("bravo-1", "down"),
    );

    let responses = executor
        .process_many(vec![request(&["alpha"]), request(&["bravo"])])
        .await;

    assert_eq!(responses.len(), 2);
    assert!(responses[0].success);
    assert!(!responses[1].success);
}

// ============================================================================
// Response Serialization
// ============================================================================

#[tokio::test]
async fn test_response_serializes_without_absent_fields() {
    let executor = executor_with(
        ScriptedProvider::new(ProviderType::Anthropic).fail("alpha-1", "down"),
    );

    let response = executor.process(&request(&["alpha"])).await;
    let json = response.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["success"], false);
    assert!(value.get("content").is_none());
    assert!(value.get("model_used").is_none());
    assert_eq!(value["attempts"].as_array().unwrap().len(), 1);
    assert_eq!(value["attempts"][0]["status"], "failure");
}
