//! Configuration file loading and environment variable resolution.

use std::env;
use std::fs;
use std::path::Path;
use regex::Regex;

use crate::errors::{LlmError, LlmResult};
use crate::providers::ProviderType;
use super::types::Config;

/// Load and parse a TOML configuration file.
///
/// # Arguments
/// * `path` - Path to the TOML configuration file
///
/// # Returns
/// * `LlmResult<Config>` - Parsed configuration with environment variables resolved
pub fn load_config<P: AsRef<Path>>(path: P) -> LlmResult<Config> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        LlmError::ConfigError(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&content)
}

/// Parse a TOML configuration string.
///
/// # Arguments
/// * `content` - TOML configuration string
///
/// # Returns
/// * `LlmResult<Config>` - Parsed configuration with environment variables resolved
pub fn parse_config(content: &str) -> LlmResult<Config> {
    let mut config: Config = toml::from_str(content).map_err(|e| {
        LlmError::ConfigError(format!("Failed to parse TOML: {}", e))
    })?;

    resolve_env_vars(&mut config)?;
    validate_config(&config)?;

    Ok(config)
}

/// Resolve environment variable references in the configuration.
///
/// Environment variables are specified using the `${VAR_NAME}` syntax.
/// If a variable is not found, an error is returned with a helpful message.
fn resolve_env_vars(config: &mut Config) -> LlmResult<()> {
    let env_var_pattern = Regex::new(r"\$\{([^}]+)\}").unwrap();

    for (provider_name, key) in config.credentials.iter_mut() {
        if let Some(resolved) = resolve_env_var_string(key, &env_var_pattern, provider_name)? {
            *key = resolved;
        }
    }

    Ok(())
}

/// Resolve environment variables in a single string.
/// Returns None if no env vars are present, Some(resolved) if all resolved successfully.
fn resolve_env_var_string(
    s: &str,
    pattern: &Regex,
    context: &str,
) -> LlmResult<Option<String>> {
    if !pattern.is_match(s) {
        return Ok(None);
    }

    let mut result = s.to_string();

    for caps in pattern.captures_iter(s) {
        let full_match = caps.get(0).unwrap().as_str();
        let var_name = caps.get(1).unwrap().as_str();

        match env::var(var_name) {
            Ok(value) => {
                result = result.replace(full_match, &value);
            }
            Err(_) => {
                return Err(LlmError::ConfigError(format!(
                    "Environment variable '{}' not found\n  \
                     → Referenced in [credentials].{}\n  \
                     → Set it with: export {}=\"your-key\"",
                    var_name, context, var_name
                )));
            }
        }
    }

    Ok(Some(result))
}

/// Validate the configuration for consistency.
fn validate_config(config: &Config) -> LlmResult<()> {
    for provider_name in config.credentials.keys() {
        ProviderType::parse(provider_name).map_err(|_| {
            LlmError::ConfigError(format!(
                "Unknown provider '{}' in [credentials]\n  \
                 → Valid providers: anthropic, openai, google, cohere",
                provider_name
            ))
        })?;
    }

    for (idx, model) in config.models.iter().enumerate() {
        ProviderType::parse(&model.provider).map_err(|_| {
            LlmError::ConfigError(format!(
                "Unknown provider type '{}' in models[{}]\n  \
                 → Valid types: anthropic, openai, google, cohere",
                model.provider, idx
            ))
        })?;

        if model.key.trim().is_empty() {
            return Err(LlmError::ConfigError(format!(
                "Empty model key in models[{}]",
                idx
            )));
        }

        // Pricing only makes sense as a pair
        if model.input_per_mtok.is_some() != model.output_per_mtok.is_some() {
            return Err(LlmError::ConfigError(format!(
                "Model '{}' specifies only one of input_per_mtok/output_per_mtok\n  \
                 → Set both or neither",
                model.key
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_config() {
        let toml = r#"
[credentials]
openai = "test-key"

[[models]]
key = "fast"
provider = "openai"
id = "gpt-4o-mini"
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.models.len(), 1);
        assert_eq!(config.credentials["openai"], "test-key");
    }

    #[test]
    fn test_env_var_resolution() {
        env::set_var("RELAYLLM_LOADER_TEST_KEY", "resolved-key");

        let toml = r#"
[credentials]
openai = "${RELAYLLM_LOADER_TEST_KEY}"
"#;

        let config = parse_config(toml).unwrap();
        assert_eq!(config.credentials["openai"], "resolved-key");

        env::remove_var("RELAYLLM_LOADER_TEST_KEY");
    }

    #[test]
    fn test_missing_env_var() {
        let toml = r#"
[credentials]
openai = "${RELAYLLM_LOADER_TEST_MISSING}"
"#;

        let result = parse_config(toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("RELAYLLM_LOADER_TEST_MISSING"));
    }

    #[test]
    fn test_invalid_provider_type() {
        let toml = r#"
[[models]]
key = "test"
provider = "invalid_provider"
id = "test-model"
"#;

        let result = parse_config(toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Unknown provider type"));
    }

    #[test]
    fn test_unpaired_pricing() {
        let toml = r#"
[[models]]
key = "test"
provider = "openai"
id = "gpt-4o"
input_per_mtok = 2.5
"#;

        let result = parse_config(toml);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("input_per_mtok/output_per_mtok"));
    }

    #[test]
    fn test_default_settings() {
        let config = parse_config("").unwrap();
        assert!(config.settings.deadline_secs.is_none());
        assert!(config.credentials.is_empty());
        assert!(config.models.is_empty());
    }
}
