use std::sync::Arc;

use parley_config::{GOOGLE_API_KEY_ENV, HUGGINGFACE_API_KEY_ENV, ProvidersConfig};

use crate::{
    error::{GatewayError, Result},
    http_client::build_http_client,
    provider::{Provider, google::GoogleProvider, huggingface::HuggingFaceProvider},
    routes::{ProviderKind, ROUTES, RouteDescriptor},
    types::{GenerationRequest, GenerationResponse, PromptRequest},
};

/// A route descriptor bound to the provider that serves it
pub struct Route {
    descriptor: RouteDescriptor,
    provider: Arc<dyn Provider>,
}

impl Route {
    pub fn new(descriptor: RouteDescriptor, provider: Arc<dyn Provider>) -> Self {
        Self { descriptor, provider }
    }

    pub const fn descriptor(&self) -> &RouteDescriptor {
        &self.descriptor
    }

    /// Forward the prompt to this route's provider and echo it back with
    /// the generated text
    pub async fn generate(&self, request: PromptRequest) -> Result<GenerationResponse> {
        let descriptor = &self.descriptor;

        tracing::debug!(
            route = descriptor.name,
            provider = self.provider.name(),
            model = descriptor.model,
            prompt_len = request.prompt.len(),
            "forwarding prompt"
        );

        let generated = self
            .provider
            .generate(GenerationRequest {
                model: descriptor.model,
                prompt: &request.prompt,
                params: descriptor.params,
            })
            .await
            .inspect_err(|e| tracing::warn!(route = descriptor.name, error = %e, "generation failed"))?;

        if generated.is_empty() {
            tracing::warn!(route = descriptor.name, model = descriptor.model, "provider returned empty generation");
            return Err(GatewayError::EmptyGeneration);
        }

        Ok(GenerationResponse {
            input_prompt: request.prompt,
            generated_response: generated,
        })
    }
}

/// Immutable set of routes, built once at startup
pub struct Gateway {
    routes: Vec<Arc<Route>>,
}

impl Gateway {
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Self {
        Self {
            routes: routes.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }
}

/// Builds the gateway's providers from configuration
pub struct GatewayBuilder<'a> {
    config: &'a ProvidersConfig,
}

impl<'a> GatewayBuilder<'a> {
    pub const fn new(config: &'a ProvidersConfig) -> Self {
        Self { config }
    }

    /// Construct providers and bind them to the route table
    ///
    /// Fails when the primary provider's key cannot be resolved; the
    /// secondary provider's key is left to request time.
    pub fn build(self) -> Result<Gateway> {
        let client = build_http_client()
            .map_err(|e| GatewayError::Configuration(format!("failed to build HTTP client: {e}")))?;

        let google_credential = self.config.google.credential(GOOGLE_API_KEY_ENV);
        let google_key = google_credential.resolve().ok_or_else(|| {
            GatewayError::Configuration(format!(
                "No API key found for the primary provider. Set {} or providers.google.api_key",
                google_credential.env_name()
            ))
        })?;

        let google: Arc<dyn Provider> = Arc::new(GoogleProvider::new(
            "google".to_owned(),
            client.clone(),
            google_key,
            self.config.google.base_url.as_ref(),
        ));

        let huggingface: Arc<dyn Provider> = Arc::new(HuggingFaceProvider::new(
            "huggingface".to_owned(),
            client,
            self.config.huggingface.credential(HUGGINGFACE_API_KEY_ENV),
            self.config.huggingface.base_url.as_ref(),
        ));

        let routes = ROUTES.into_iter().map(|descriptor| {
            let provider = match descriptor.provider {
                ProviderKind::Google => Arc::clone(&google),
                ProviderKind::HuggingFace => Arc::clone(&huggingface),
            };
            Route::new(descriptor, provider)
        });

        let gateway = Gateway::new(routes);
        tracing::debug!("gateway initialized with {} route(s)", gateway.routes().len());

        Ok(gateway)
    }
}
