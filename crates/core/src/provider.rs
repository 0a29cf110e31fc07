//! ModelProvider trait — the abstraction over the generative-model backend.
//!
//! A provider knows how to send one structured-output request to a model and
//! return the raw response text. Validation of that text belongs to the
//! digest pipeline, not the provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// One structured-output generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// The model to use (e.g., "gemini-2.5-pro")
    pub model: String,

    /// The research query — the single user turn
    pub query: String,

    /// System instruction governing the model's conduct
    pub system_instruction: String,

    /// JSON Schema the response must conform to
    pub response_schema: serde_json::Value,
}

/// The model-provider seam.
///
/// Exactly one call per run, no retry, no streaming: a failure propagates to
/// the caller as-is. Tests implement this with deterministic fakes.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a request and return the raw response text.
    async fn generate(&self, request: GenerateRequest) -> Result<String, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_schema() {
        let req = GenerateRequest {
            model: "gemini-2.5-pro".into(),
            query: "find papers".into(),
            system_instruction: "be terse".into(),
            response_schema: serde_json::json!({"type": "object"}),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("gemini-2.5-pro"));
        assert!(json.contains("\"type\":\"object\""));
    }
}
