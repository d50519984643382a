//! RelayLLM is a Rust library for ordered-fallback routing of text generation
//! across multiple LLM providers.
//!
//! A request carries a prompt and a prioritized list of model keys. The
//! executor tries each candidate in order, dispatching to its provider, and
//! returns on the first success; every attempt is recorded with timing, error
//! and cost metadata, and cost is aggregated across all billed attempts.
//!
//! # Features
//!
//! - **Multi-provider support**: Anthropic, OpenAI, Google, and Cohere behind
//!   one dispatch interface
//! - **Ordered fallback**: the model list is the whole routing policy; first
//!   success wins
//! - **Attempt accounting**: a full per-attempt log with latency, errors and
//!   billed cost in every response
//! - **Predefined strategies**: quality-first, speed-first, cost-first and
//!   single-provider orderings
//!
//! # Example
//!
//! ```no_run
//! use relayllm::{FallbackExecutor, GenerationRequest};
//!
//! async fn example() {
//!     // Registry and credentials from the environment
//!     let executor = FallbackExecutor::with_defaults();
//!
//!     let request = GenerationRequest::builder("Explain Rust in one paragraph")
//!         .model("claude-3-5-sonnet")
//!         .model("gpt-4o-mini")
//!         .max_tokens(500)
//!         .build()
//!         .expect("valid request");
//!
//!     let response = executor.process(&request).await;
//!     if response.success {
//!         println!("{}", response.content.unwrap_or_default());
//!     } else {
//!         eprintln!("all candidates failed: {:?}", response.error);
//!     }
//! }
//! ```

pub mod providers;
pub mod errors;
pub mod constants;
pub mod registry;
pub mod credentials;
pub mod fallback;
pub mod config;

pub use providers::{
    ProviderType,
    LlmProvider,
    LlmRequest,
    LlmResponse,
    TokenUsage,
    create_provider,
    AnthropicProvider,
    OpenAIProvider,
    GoogleProvider,
    CohereProvider,
};

pub use errors::{LlmError, LlmResult};

pub use registry::{ModelRegistry, ModelEntry, ModelPricing};
pub use credentials::CredentialStore;

pub use fallback::{
    FallbackExecutor,
    GenerationRequest,
    FallbackResponse,
    AttemptRecord,
    AttemptStatus,
    Strategy,
    strategies,
    strategy,
};

/// Initialize the logging system
///
/// This should be called at the start of your application in case
/// you want to activate the library's debug and info logging.
pub fn use_logging() {
    env_logger::init();
}
