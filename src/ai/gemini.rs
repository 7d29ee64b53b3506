// src/ai/gemini.rs
//! HTTP client for the Generative Language `generateContent` endpoint

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, trace};

use crate::error::{ResumeError, ResumeResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Source of generated text; the seam the critique client is written against
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// False when no credential is configured; callers must not call out then
    fn has_credential(&self) -> bool;

    async fn generate(&self, prompt: &str) -> ResumeResult<String>;

    /// Generate text constrained to the given response schema
    async fn generate_json(&self, prompt: &str, schema: &Value) -> ResumeResult<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    fn has_credential(&self) -> bool {
        (**self).has_credential()
    }

    async fn generate(&self, prompt: &str) -> ResumeResult<String> {
        (**self).generate(prompt).await
    }

    async fn generate_json(&self, prompt: &str, schema: &Value) -> ResumeResult<String> {
        (**self).generate_json(prompt, schema).await
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// ===== Wire Types =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ===== Client =====

pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> ResumeResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn send(&self, request: &GenerateRequest<'_>) -> ResumeResult<String> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(ResumeError::MissingCredential)?;

        let url = self.endpoint();
        info!("Calling generative service: {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        trace!("Generative service responded {}", status);

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiError>(&body) {
                Ok(api_error) => api_error.error.message,
                Err(_) => body,
            };
            error!("Generative service error {}: {}", status, message);
            return Err(ResumeError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)?;
        parsed.text().ok_or(ResumeError::EmptyResponse)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    fn has_credential(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    async fn generate(&self, prompt: &str) -> ResumeResult<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: None,
        };
        self.send(&request).await
    }

    async fn generate_json(&self, prompt: &str, schema: &Value) -> ResumeResult<String> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        };
        self.send(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format() {
        let schema = serde_json::json!({"type": "OBJECT"});
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: "你好" }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &schema,
            }),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "你好");
        assert_eq!(
            value["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(value["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body = r#"{"candidates": [{"content": {"role": "model",
            "parts": [{"text": "第一段"}, {"text": "第二段"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("第一段第二段"));
    }

    #[test]
    fn test_blank_response_has_no_text() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(parsed.text().is_none());
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert!(parsed.text().is_none());
    }

    #[test]
    fn test_endpoint_and_credential() {
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(!client.has_credential());
    }

    #[tokio::test]
    async fn test_missing_key_never_sends() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, ResumeError::MissingCredential));
    }
}
