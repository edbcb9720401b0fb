//! Hugging Face Inference text-generation provider

use std::time::Duration;

use async_trait::async_trait;
use parley_config::Credential;
use reqwest::Client;
use secrecy::ExposeSecret;
use url::Url;

use super::Provider;
use crate::error::{GatewayError, Result};
use crate::protocol::huggingface::{HfRequest, HfResponse};
use crate::types::GenerationRequest;

/// Default Hugging Face Inference base URL
pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";

/// Per-request timeout applied to Hugging Face calls
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Hugging Face Inference provider
///
/// The credential is resolved on every call, so a missing key fails that
/// request without touching the network and without affecting startup.
pub struct HuggingFaceProvider {
    name: String,
    client: Client,
    base_url: String,
    credential: Credential,
    timeout: Duration,
}

impl HuggingFaceProvider {
    pub fn new(name: String, client: Client, credential: Credential, base_url: Option<&Url>) -> Self {
        let base_url = base_url
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Self {
            name,
            client,
            base_url,
            credential,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{model}", self.base_url)
    }
}

#[async_trait]
impl Provider for HuggingFaceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let Some(api_key) = self.credential.resolve() else {
            tracing::warn!(provider = %self.name, env = %self.credential.env_name(), "API key not configured");
            return Err(GatewayError::Configuration(format!(
                "HuggingFace API key not configured (set {})",
                self.credential.env_name()
            )));
        };

        let wire_request = HfRequest::from_prompt(request.prompt, request.params);

        let response = self
            .client
            .post(self.model_url(request.model))
            .bearer_auth(api_key.expose_secret())
            .timeout(self.timeout)
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, model = %request.model, error = %e, "upstream request failed");
                GatewayError::provider(&self.name, e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::provider(&self.name, format!("failed to read response: {e}")))?;

        let parsed = serde_json::from_str::<HfResponse>(&body);

        if !status.is_success() {
            tracing::warn!(provider = %self.name, model = %request.model, %status, "upstream returned error");

            let message = match parsed {
                Ok(HfResponse::Error { error }) => error,
                _ => body,
            };
            return Err(GatewayError::provider(
                &self.name,
                format!("provider returned {status}: {message}"),
            ));
        }

        match parsed {
            Ok(HfResponse::Batch(generations)) => {
                Ok(generations.into_iter().next().map(|g| g.generated_text).unwrap_or_default())
            }
            Ok(HfResponse::Single(generation)) => Ok(generation.generated_text),
            Ok(HfResponse::Error { error }) => Err(GatewayError::provider(&self.name, error)),
            Err(e) => Err(GatewayError::provider(&self.name, format!("failed to parse response: {e}"))),
        }
    }
}
