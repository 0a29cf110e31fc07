//! Gemini provider implementation.
//!
//! Uses the Generative Language API's `generateContent` endpoint directly.
//!
//! Features:
//! - `x-goog-api-key` header authentication
//! - System instruction as a top-level field
//! - Structured output via `responseMimeType` + `responseSchema`
//! - Search grounding via the `google_search` tool
//!
//! One non-streaming call per run; any timeout or retry policy belongs to
//! the caller, not here.

use async_trait::async_trait;
use scout_core::error::ProviderError;
use scout_core::provider::{GenerateRequest, ModelProvider};
use serde::Deserialize;
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            name: "gemini".into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the `generateContent` request body.
    fn build_body(request: &GenerateRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.query }]
            }],
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            },
            "tools": [{ "google_search": {} }]
        })
    }

    /// Concatenate the text parts of the first candidate.
    fn extract_text(resp: &GeminiResponse) -> String {
        let Some(candidate) = resp.candidates.first() else {
            return String::new();
        };

        let mut text = String::new();
        for part in &candidate.content.parts {
            if let Some(t) = &part.text {
                text.push_str(t);
            }
        }
        text
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(
                "GEMINI_API_KEY not available".into(),
            ));
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, request.model
        );
        let body = Self::build_body(&request);

        debug!(provider = "gemini", model = %request.model, "Sending generation request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited);
        }
        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid Gemini API key".into(),
            ));
        }
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Gemini API error");
            return Err(ProviderError::Api {
                status_code: status,
                message: error_body,
            });
        }

        let api_resp: GeminiResponse =
            response.json().await.map_err(|e| ProviderError::Api {
                status_code: 200,
                message: format!("Failed to parse Gemini response: {e}"),
            })?;

        debug!(provider = "gemini", "Response received");
        Ok(Self::extract_text(&api_resp))
    }
}

// --- Gemini API types ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
    #[serde(default, rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest {
            model: "gemini-2.5-pro".into(),
            query: "find papers".into(),
            system_instruction: "be terse".into(),
            response_schema: serde_json::json!({"type": "object"}),
        }
    }

    #[test]
    fn constructor() {
        let provider = GeminiProvider::new("AIza-test");
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn constructor_with_base_url() {
        let provider = GeminiProvider::new("AIza-test").with_base_url("https://proxy.example.com/");
        assert_eq!(provider.base_url, "https://proxy.example.com");
    }

    #[test]
    fn body_carries_query_instruction_and_schema() {
        let body = GeminiProvider::build_body(&request());
        assert_eq!(body["contents"][0]["parts"][0]["text"], "find papers");
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be terse");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "object");
    }

    #[test]
    fn body_enables_search_grounding() {
        let body = GeminiProvider::build_body(&request());
        assert!(body["tools"][0]["google_search"].is_object());
    }

    #[test]
    fn extract_text_concatenates_parts() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "{\"topic\":"},
                            {"text": " \"Garment Simulation\"}"}
                        ],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }]
            }"#,
        )
        .unwrap();

        assert_eq!(
            GeminiProvider::extract_text(&resp),
            "{\"topic\": \"Garment Simulation\"}"
        );
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn extract_text_empty_when_no_candidates() {
        let resp: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(GeminiProvider::extract_text(&resp), "");

        let resp: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(GeminiProvider::extract_text(&resp), "");
    }

    #[test]
    fn extract_text_skips_non_text_parts() {
        let resp: GeminiResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"inlineData": {"mimeType": "image/png", "data": ""}},
                            {"text": "payload"}
                        ]
                    }
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(GeminiProvider::extract_text(&resp), "payload");
    }

    #[tokio::test]
    async fn missing_api_key_is_not_configured() {
        let provider = GeminiProvider::new("");
        let err = provider.generate(request()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
