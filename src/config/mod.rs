//! Configuration module for TOML-based executor configuration.
//!
//! This module provides the ability to configure the executor using
//! TOML files instead of code, making it easier to manage model tables
//! and credentials declaratively.
//!
//! # Example Configuration File
//!
//! ```toml
//! [settings]
//! deadline_secs = 60
//!
//! [credentials]
//! openai = "${OPENAI_API_KEY}"
//! anthropic = "${ANTHROPIC_API_KEY}"
//!
//! [[models]]
//! key = "gpt-4o-cheap"
//! provider = "openai"
//! id = "gpt-4o-mini"
//! name = "GPT-4o Mini (alias)"
//! input_per_mtok = 0.15
//! output_per_mtok = 0.6
//! ```
//!
//! # Environment Variables
//!
//! Credential values can reference environment variables using the
//! `${VAR_NAME}` syntax. These are resolved at load time.

mod types;
mod loader;

pub use types::{Config, Settings, ModelConfig};
pub use loader::{load_config, parse_config};
