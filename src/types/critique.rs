// src/types/critique.rs
use serde::{Deserialize, Serialize};

/// Score/keywords/suggestions triple returned by the keyword check.
/// The score is meant to be 0-100 but nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CritiqueResult {
    pub score: i64,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl CritiqueResult {
    /// Returned without any request when no API key is configured
    pub fn credential_missing() -> Self {
        Self {
            score: 0,
            missing_keywords: vec!["API Key Missing".to_string()],
            suggestions: vec!["请配置 API Key 后重试。".to_string()],
        }
    }

    /// Returned when the service call fails for any other reason
    pub fn service_error() -> Self {
        Self {
            score: 0,
            missing_keywords: Vec::new(),
            suggestions: vec!["分析失败，请稍后重试。".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = r#"{"score": 72, "missingKeywords": ["Rust"], "suggestions": ["量化成果"]}"#;
        let parsed: CritiqueResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.score, 72);
        assert_eq!(parsed.missing_keywords, vec!["Rust"]);
        assert_eq!(parsed.suggestions, vec!["量化成果"]);
    }

    #[test]
    fn test_credential_missing_shape() {
        let result = CritiqueResult::credential_missing();
        assert_eq!(result.score, 0);
        assert_eq!(result.missing_keywords, vec!["API Key Missing"]);
        assert!(!result.suggestions.is_empty());
    }
}
