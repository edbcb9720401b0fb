//! Google Generative Language API wire format types

use serde::{Deserialize, Serialize};

use crate::types::GenerationParams;

/// `generateContent` request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRequest<'a> {
    pub contents: Vec<GoogleContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GoogleGenerationConfig>,
}

impl<'a> GoogleRequest<'a> {
    /// Single-turn user prompt
    pub fn from_prompt(prompt: &'a str, params: GenerationParams) -> Self {
        Self {
            contents: vec![GoogleContent {
                role: "user",
                parts: vec![GoogleRequestPart { text: prompt }],
            }],
            generation_config: (!params.is_default()).then(|| GoogleGenerationConfig {
                max_output_tokens: params.max_new_tokens,
                temperature: params.temperature,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleContent<'a> {
    pub role: &'a str,
    pub parts: Vec<GoogleRequestPart<'a>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleRequestPart<'a> {
    pub text: &'a str,
}

/// Generation configuration parameters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// `generateContent` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleResponse {
    #[serde(default)]
    pub candidates: Vec<GoogleCandidate>,
    /// Present when the prompt itself was blocked
    #[serde(default)]
    pub prompt_feedback: Option<GooglePromptFeedback>,
}

impl GoogleResponse {
    /// Text of the first candidate, parts concatenated
    ///
    /// Empty when there is no candidate or it carries no text parts.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.iter().filter_map(|part| part.text.as_deref()).collect())
            .unwrap_or_default()
    }

    /// Reason the prompt was blocked, if it was
    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleCandidate {
    /// Absent when generation was stopped by a safety filter
    #[serde(default)]
    pub content: Option<GoogleResponseContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleResponseContent {
    #[serde(default)]
    pub parts: Vec<GoogleResponsePart>,
}

/// Non-text parts (function calls, inline data) deserialize with `text: None`
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: GoogleErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    pub message: String,
}
