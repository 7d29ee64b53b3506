// src/ai/critique.rs
//! Prose rewrites and keyword critique with catch-and-degrade fallbacks.
//! One best-effort round trip per call: no retries, caching or rate limiting.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::ai::gemini::{GeminiClient, GeminiConfig, TextGenerator};
use crate::ai::prompts;
use crate::error::ResumeResult;
use crate::types::{CritiqueResult, ResumeDocument};

pub struct CritiqueClient<G> {
    generator: G,
}

impl CritiqueClient<GeminiClient> {
    pub fn gemini(config: GeminiConfig) -> ResumeResult<Self> {
        Ok(Self::new(GeminiClient::new(config)?))
    }
}

impl<G: TextGenerator> CritiqueClient<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn has_credential(&self) -> bool {
        self.generator.has_credential()
    }

    /// Rewrite a summary or self-evaluation; the input comes back on any failure
    pub async fn rewrite_summary(&self, current: &str, job_title: &str, skills: &[String]) -> String {
        let prompt = prompts::summary_prompt(current, job_title, skills);
        self.rewrite("summary", current, &prompt).await
    }

    /// Rewrite one highlight; the input comes back on any failure
    pub async fn improve_bullet(&self, bullet: &str) -> String {
        let prompt = prompts::bullet_prompt(bullet);
        self.rewrite("bullet", bullet, &prompt).await
    }

    async fn rewrite(&self, kind: &str, original: &str, prompt: &str) -> String {
        if !self.generator.has_credential() {
            warn!("No API key configured, {} rewrite skipped", kind);
            return original.to_string();
        }

        match self.generator.generate(prompt).await {
            Ok(text) => {
                let text = strip_quotes(text.trim());
                if text.is_empty() {
                    warn!("Empty {} rewrite, keeping original", kind);
                    original.to_string()
                } else {
                    info!("Rewrote {} ({} chars)", kind, text.chars().count());
                    text.to_string()
                }
            }
            Err(e) => {
                warn!("{} rewrite failed, keeping original: {}", kind, e);
                original.to_string()
            }
        }
    }

    /// Score the document against its target title
    pub async fn critique(&self, doc: &ResumeDocument) -> CritiqueResult {
        if !self.generator.has_credential() {
            warn!("No API key configured, critique skipped");
            return CritiqueResult::credential_missing();
        }

        let prompt = prompts::critique_prompt(doc);
        let text = match self
            .generator
            .generate_json(&prompt, &critique_schema())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                warn!("Critique request failed: {}", e);
                return CritiqueResult::service_error();
            }
        };

        match serde_json::from_str::<CritiqueResult>(strip_code_fence(&text)) {
            Ok(result) => {
                info!(
                    "Critique score {} with {} missing keywords",
                    result.score,
                    result.missing_keywords.len()
                );
                result
            }
            Err(e) => {
                warn!("Critique response was not valid JSON: {}", e);
                CritiqueResult::service_error()
            }
        }
    }
}

/// Response shape requested from the service for the critique
pub fn critique_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER" },
            "missingKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["score", "missingKeywords", "suggestions"]
    })
}

/// Unwraps text that is one quoted span; inner quotes mean several spans, left as is
fn strip_quotes(text: &str) -> &str {
    let pairs = [('"', '"'), ('“', '”'), ('「', '」')];
    for (open, close) in pairs {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            if inner.contains([open, close]) {
                return text;
            }
            return inner.trim();
        }
    }
    text
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => trimmed,
    }
}
