use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Environment variable holding the Google Generative Language API key
pub const GOOGLE_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable holding the Hugging Face Inference API key
pub const HUGGINGFACE_API_KEY_ENV: &str = "HUGGINGFACE_API_KEY";

/// Upstream provider configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    /// Primary provider (Google Generative Language API)
    #[serde(default)]
    pub google: ProviderConfig,
    /// Secondary provider (Hugging Face Inference)
    #[serde(default)]
    pub huggingface: ProviderConfig,
}

/// Connection settings for a single provider
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Static API key; takes precedence over `api_key_env`
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Environment variable to read the key from when no static key is set
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
}

impl ProviderConfig {
    /// Credential for this provider, falling back to `default_env`
    /// when no variable name is configured
    pub fn credential(&self, default_env: &str) -> Credential {
        Credential {
            key: self.api_key.clone(),
            env: self.api_key_env.clone().unwrap_or_else(|| default_env.to_owned()),
        }
    }
}

/// Where a provider API key comes from
///
/// Resolution is lazy: callers decide whether to resolve once at startup or
/// on every request.
#[derive(Debug, Clone)]
pub struct Credential {
    key: Option<SecretString>,
    env: String,
}

impl Credential {
    /// Credential backed only by the named environment variable
    pub fn from_env(env: impl Into<String>) -> Self {
        Self {
            key: None,
            env: env.into(),
        }
    }

    /// Name of the environment variable consulted when no static key is set
    pub fn env_name(&self) -> &str {
        &self.env
    }

    /// Resolve the key; empty values count as absent
    pub fn resolve(&self) -> Option<SecretString> {
        if let Some(key) = &self.key {
            return (!key.expose_secret().is_empty()).then(|| key.clone());
        }

        std::env::var(&self.env)
            .ok()
            .filter(|value| !value.is_empty())
            .map(SecretString::from)
    }
}
