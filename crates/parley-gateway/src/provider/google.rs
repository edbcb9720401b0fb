//! Google Generative Language API provider

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::Provider;
use crate::error::{GatewayError, Result};
use crate::protocol::google::{GoogleErrorResponse, GoogleRequest, GoogleResponse};
use crate::types::GenerationRequest;

/// Default Google Generative Language API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Generative Language API provider
///
/// The key is resolved before construction; a `GoogleProvider` always has one.
pub struct GoogleProvider {
    name: String,
    client: Client,
    base_url: String,
    api_key: SecretString,
}

impl GoogleProvider {
    pub fn new(name: String, client: Client, api_key: SecretString, base_url: Option<&Url>) -> Self {
        let base_url = base_url
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/')
            .to_owned();

        Self {
            name,
            client,
            base_url,
            api_key,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }
}

#[async_trait]
impl Provider for GoogleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerationRequest<'_>) -> Result<String> {
        let wire_request = GoogleRequest::from_prompt(request.prompt, request.params);

        // Key travels in a header so it never shows up in URLs that reqwest
        // echoes into its error messages.
        let response = self
            .client
            .post(self.generate_url(request.model))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name, error = %e, "upstream request failed");
                GatewayError::provider(&self.name, e.to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::provider(&self.name, format!("failed to read response: {e}")))?;

        if !status.is_success() {
            tracing::warn!(provider = %self.name, %status, "upstream returned error");

            let message = serde_json::from_str::<GoogleErrorResponse>(&body).map_or(body, |e| e.error.message);
            return Err(GatewayError::provider(
                &self.name,
                format!("provider returned {status}: {message}"),
            ));
        }

        let wire_response: GoogleResponse = serde_json::from_str(&body)
            .map_err(|e| GatewayError::provider(&self.name, format!("failed to parse response: {e}")))?;

        if let Some(reason) = wire_response.block_reason() {
            return Err(GatewayError::provider(&self.name, format!("prompt was blocked: {reason}")));
        }

        Ok(wire_response.text())
    }
}
