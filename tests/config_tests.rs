//! Tests for TOML configuration and executor wiring.

use std::env;

use relayllm::config::parse_config;
use relayllm::{FallbackExecutor, ProviderType};

// ============================================================================
// Parsing Tests
// ============================================================================

#[test]
fn test_full_config_parses() {
    let toml = r#"
[settings]
deadline_secs = 45

[credentials]
openai = "sk-test"

[[models]]
key = "pinned-4o"
provider = "openai"
id = "gpt-4o-2024-11-20"
name = "GPT-4o (pinned)"
input_per_mtok = 2.5
output_per_mtok = 10.0
"#;

    let config = parse_config(toml).unwrap();
    assert_eq!(config.settings.deadline_secs, Some(45));
    assert_eq!(config.credentials["openai"], "sk-test");
    assert_eq!(config.models.len(), 1);
    assert_eq!(config.models[0].key, "pinned-4o");
}

#[test]
fn test_unknown_credential_provider_rejected() {
    let toml = r#"
[credentials]
litellm = "key"
"#;

    let result = parse_config(toml);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unknown provider"));
}

#[test]
fn test_credential_env_resolution() {
    env::set_var("RELAYLLM_CONFIG_TEST_KEY", "resolved-value");

    let toml = r#"
[credentials]
anthropic = "${RELAYLLM_CONFIG_TEST_KEY}"
"#;

    let config = parse_config(toml).unwrap();
    assert_eq!(config.credentials["anthropic"], "resolved-value");

    env::remove_var("RELAYLLM_CONFIG_TEST_KEY");
}

// ============================================================================
// Registry and Credential Wiring Tests
// ============================================================================

#[test]
fn test_config_extends_default_registry() {
    let toml = r#"
[[models]]
key = "my-sonnet"
provider = "anthropic"
id = "claude-3-5-sonnet-20241022"
"#;

    let config = parse_config(toml).unwrap();
    let registry = config.build_registry().unwrap();

    // Built-in entries survive alongside the configured one
    assert!(registry.contains("gpt-4o"));
    let entry = registry.resolve("my-sonnet").unwrap();
    assert_eq!(entry.provider, ProviderType::Anthropic);
    assert_eq!(entry.display_name, "my-sonnet");
    assert!(entry.pricing.is_none());
}

#[test]
fn test_config_overrides_builtin_entry() {
    let toml = r#"
[[models]]
key = "gpt-4o"
provider = "openai"
id = "gpt-4o-2024-11-20"
name = "GPT-4o (pinned)"
"#;

    let config = parse_config(toml).unwrap();
    let registry = config.build_registry().unwrap();

    let entry = registry.resolve("gpt-4o").unwrap();
    assert_eq!(entry.model_id, "gpt-4o-2024-11-20");
}

#[test]
fn test_config_credentials_make_provider_available() {
    let toml = r#"
[credentials]
cohere = "co-test-key"
"#;

    let config = parse_config(toml).unwrap();
    let credentials = config.build_credentials().unwrap();

    assert!(credentials.is_available(ProviderType::Cohere));
    assert_eq!(credentials.key_for(ProviderType::Cohere), Some("co-test-key"));
}

// ============================================================================
// Executor Construction Tests
// ============================================================================

#[test]
fn test_executor_from_config_str() {
    let toml = r#"
[settings]
deadline_secs = 10

[credentials]
openai = "sk-test"

[[models]]
key = "alias"
provider = "openai"
id = "gpt-4o-mini"
"#;

    let executor = FallbackExecutor::from_config_str(toml).unwrap();

    assert!(executor.registry().contains("alias"));
    assert!(executor.available_providers().contains(&ProviderType::OpenAI));
}

#[test]
fn test_executor_from_config_str_invalid() {
    let result = FallbackExecutor::from_config_str("settings = \"not a table\"");
    assert!(result.is_err());
}
