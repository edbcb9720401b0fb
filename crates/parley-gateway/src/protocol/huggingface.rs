//! Hugging Face Inference text-generation wire format types

use serde::{Deserialize, Serialize};

use crate::types::GenerationParams;

/// Text-generation task request
#[derive(Debug, Clone, Serialize)]
pub struct HfRequest<'a> {
    pub inputs: &'a str,
    pub parameters: HfParameters,
}

impl<'a> HfRequest<'a> {
    pub const fn from_prompt(prompt: &'a str, params: GenerationParams) -> Self {
        Self {
            inputs: prompt,
            parameters: HfParameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                return_full_text: false,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HfParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Only the continuation is wanted, never the echoed prompt
    pub return_full_text: bool,
}

/// Text-generation task response
///
/// The hosted API answers with a list; some deployments answer with a
/// single object. Failures arrive as `{"error": "..."}`, sometimes with a
/// success status.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum HfResponse {
    Error { error: String },
    Batch(Vec<HfGeneration>),
    Single(HfGeneration),
}

/// One generation; objects without `generated_text` are not generations
#[derive(Debug, Clone, Deserialize)]
pub struct HfGeneration {
    pub generated_text: String,
}
