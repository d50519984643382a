//! Tests for the predefined fallback strategies.

use relayllm::fallback::strategies::DEFAULT_STRATEGY;
use relayllm::{strategies, strategy, ModelRegistry};

#[test]
fn test_strategies_are_present_with_unique_names() {
    let all = strategies();
    assert!(!all.is_empty());

    let mut names: Vec<&str> = all.iter().map(|s| s.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), all.len());
}

#[test]
fn test_default_strategy_exists() {
    assert!(strategy(DEFAULT_STRATEGY).is_some());
}

#[test]
fn test_lookup_by_name() {
    let quality = strategy("quality_first").unwrap();
    assert_eq!(quality.models[0], "claude-3-5-sonnet");

    let openai = strategy("openai_only").unwrap();
    assert_eq!(openai.models, &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo"]);
}

#[test]
fn test_unknown_strategy_is_none() {
    assert!(strategy("no_such_strategy").is_none());
}

#[test]
fn test_every_strategy_model_resolves_in_default_registry() {
    let registry = ModelRegistry::with_defaults();
    for strategy in strategies() {
        assert!(!strategy.models.is_empty());
        for key in strategy.models {
            assert!(
                registry.contains(key),
                "strategy '{}' references unregistered model '{}'",
                strategy.name,
                key
            );
        }
    }
}

#[test]
fn test_strategy_builds_request_in_order() {
    let speed = strategy("speed_first").unwrap();
    let request = speed.request("hello").unwrap();

    assert_eq!(request.prompt, "hello");
    let models: Vec<&str> = request.models.iter().map(String::as_str).collect();
    assert_eq!(models, speed.models);
    assert!(request.request_id.is_some());
}

#[test]
fn test_strategy_rejects_empty_prompt() {
    let quality = strategy("quality_first").unwrap();
    assert!(quality.request("").is_err());
}
