//! Predefined fallback orderings.
//!
//! A strategy is nothing more than a named model ordering; the
//! executor has no knowledge of them. They exist so callers and the
//! command surface can pick a sensible list without spelling out model
//! keys.

use crate::errors::LlmResult;
use crate::fallback::request::GenerationRequest;

/// A named fallback ordering over registry model keys
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub description: &'static str,
    pub models: &'static [&'static str],
}

impl Strategy {
    /// Builds a request that tries this strategy's models in order
    pub fn request(&self, prompt: impl Into<String>) -> LlmResult<GenerationRequest> {
        GenerationRequest::builder(prompt)
            .models(self.models.iter().map(|m| m.to_string()).collect())
            .build()
    }
}

/// Strategy used when the caller names none
pub const DEFAULT_STRATEGY: &str = "quality_first";

const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "quality_first",
        description: "Strongest models first, cheaper fallbacks after",
        models: &["claude-3-5-sonnet", "gpt-4o", "gpt-4o-mini"],
    },
    Strategy {
        name: "speed_first",
        description: "Fastest models first",
        models: &["claude-3-haiku", "gpt-4o-mini", "claude-3-5-sonnet"],
    },
    Strategy {
        name: "cost_first",
        description: "Cheapest models first",
        models: &["gpt-4o-mini", "claude-3-haiku", "gpt-4o"],
    },
    Strategy {
        name: "anthropic_only",
        description: "Anthropic models only",
        models: &["claude-3-5-sonnet", "claude-3-haiku"],
    },
    Strategy {
        name: "openai_only",
        description: "OpenAI models only",
        models: &["gpt-4o", "gpt-4o-mini", "gpt-4-turbo"],
    },
];

/// All predefined strategies
pub fn strategies() -> &'static [Strategy] {
    STRATEGIES
}

/// Look up a strategy by name
pub fn strategy(name: &str) -> Option<&'static Strategy> {
    STRATEGIES.iter().find(|s| s.name == name)
}
