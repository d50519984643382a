use serde::{Serialize, Deserialize};

use crate::providers::TokenUsage;

/// Terminal state of one attempt against a candidate model
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Success,
    Failure,
}

/// One entry in the ordered attempt log.
///
/// A record is created per candidate tried, whether the candidate
/// resolved or not, and is never mutated after being appended.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AttemptRecord {
    /// Model key from the fallback list
    pub model: String,
    /// Display name, falls back to the key when the model is unknown
    pub name: String,
    pub status: AttemptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub latency_ms: u64,
    /// Billed amount, present when the attempt incurred billing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

impl AttemptRecord {
    pub fn success(
        model: impl Into<String>,
        name: impl Into<String>,
        latency_ms: u64,
        cost: Option<f64>,
    ) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            status: AttemptStatus::Success,
            error: None,
            latency_ms,
            cost,
        }
    }

    pub fn failure(
        model: impl Into<String>,
        name: impl Into<String>,
        error: impl Into<String>,
        latency_ms: u64,
        cost: Option<f64>,
    ) -> Self {
        Self {
            model: model.into(),
            name: name.into(),
            status: AttemptStatus::Failure,
            error: Some(error.into()),
            latency_ms,
            cost,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == AttemptStatus::Success
    }
}

/// Terminal result of processing one request.
///
/// `cost` sums every attempt that reported billing, including failed
/// attempts a provider charged for. None means no attempt reported a
/// cost at all, which is different from a known zero.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FallbackResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_used: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub attempts: Vec<AttemptRecord>,
}

impl FallbackResponse {
    pub(crate) fn succeeded(
        content: String,
        model_used: String,
        usage: Option<TokenUsage>,
        attempts: Vec<AttemptRecord>,
    ) -> Self {
        Self {
            success: true,
            content: Some(content),
            model_used: Some(model_used),
            cost: total_cost(&attempts),
            usage,
            error: None,
            attempts,
        }
    }

    pub(crate) fn failed(error: String, attempts: Vec<AttemptRecord>) -> Self {
        Self {
            success: false,
            content: None,
            model_used: None,
            cost: total_cost(&attempts),
            usage: None,
            error: Some(error),
            attempts,
        }
    }

    /// Serializes the response to pretty-printed JSON
    pub fn to_json(&self) -> crate::errors::LlmResult<String> {
        serde_json::to_string_pretty(self).map_err(crate::errors::LlmError::from)
    }
}

/// Sum of billed amounts across attempts; None when nothing was billed
fn total_cost(attempts: &[AttemptRecord]) -> Option<f64> {
    let billed: Vec<f64> = attempts.iter().filter_map(|a| a.cost).collect();
    if billed.is_empty() {
        None
    } else {
        Some(billed.iter().sum())
    }
}
