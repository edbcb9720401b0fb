//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use parley_config::{Config, CorsConfig, ProviderConfig, ProvidersConfig, ServerConfig};
use secrecy::SecretString;
use url::Url;

use super::mock_upstream::MockUpstream;

/// Environment variables no test ever sets, used to model absent keys
const UNSET_GOOGLE_ENV: &str = "PARLEY_TEST_GEMINI_KEY_NEVER_SET";
const UNSET_HF_ENV: &str = "PARLEY_TEST_HF_KEY_NEVER_SET";

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Both providers keyed and pointed at `upstream`
    pub fn new(upstream: &MockUpstream) -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    ..ServerConfig::default()
                },
                providers: ProvidersConfig {
                    google: keyed(upstream.google_base_url(), MockUpstream::GOOGLE_KEY),
                    huggingface: keyed(upstream.hf_base_url(), MockUpstream::HF_KEY),
                },
                telemetry: None,
            },
        }
    }

    /// Leave the primary provider without any resolvable key
    pub fn without_google_key(mut self) -> Self {
        self.config.providers.google.api_key = None;
        self.config.providers.google.api_key_env = Some(UNSET_GOOGLE_ENV.to_owned());
        self
    }

    /// Leave the secondary provider without any resolvable key
    pub fn without_hf_key(mut self) -> Self {
        self.config.providers.huggingface.api_key = None;
        self.config.providers.huggingface.api_key_env = Some(UNSET_HF_ENV.to_owned());
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = config;
        self
    }

    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

fn keyed(base_url: String, key: &str) -> ProviderConfig {
    ProviderConfig {
        api_key: Some(SecretString::from(key)),
        api_key_env: None,
        base_url: Some(Url::parse(&base_url).unwrap()),
    }
}
