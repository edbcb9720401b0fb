use serde::{Deserialize, Serialize};

/// Inbound payload shared by every generation route
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PromptRequest {
    /// Text forwarded to the model; empty strings are allowed
    pub prompt: String,
}

/// Successful reply shared by every generation route
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationResponse {
    /// The request's prompt, verbatim
    pub input_prompt: String,
    /// Provider output, unmodified
    pub generated_response: String,
}

/// Fixed sampling knobs attached to a route
///
/// `None` leaves the provider's own default in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

impl GenerationParams {
    pub const fn is_default(&self) -> bool {
        self.max_new_tokens.is_none() && self.temperature.is_none()
    }
}

/// What a provider needs to run a single generation
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub params: GenerationParams,
}
