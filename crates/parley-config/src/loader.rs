use std::path::Path;

use crate::{AnyOrArray, Config};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, placeholder expansion
    /// fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load `path` if it exists, otherwise fall back to built-in defaults
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "config file not found, using defaults");

        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML text, expanding `{{ env.VAR }}` first
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// Provider credentials are not checked here; the gateway resolves them
    /// when it is built.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_server()?;
        self.validate_telemetry()?;
        Ok(())
    }

    fn validate_server(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/', got '{}'", health.path);
        }

        let cors = &self.server.cors;
        if cors.credentials && cors.origins == AnyOrArray::Any {
            anyhow::bail!("server.cors.credentials cannot be combined with wildcard origins");
        }

        Ok(())
    }

    fn validate_telemetry(&self) -> anyhow::Result<()> {
        let Some(tracing) = self.telemetry.as_ref().and_then(|t| t.tracing.as_ref()) else {
            return Ok(());
        };

        if !(0.0..=1.0).contains(&tracing.sampling_rate) {
            anyhow::bail!(
                "telemetry.tracing.sampling_rate must be between 0.0 and 1.0, got {}",
                tracing.sampling_rate
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;
    use crate::HUGGINGFACE_API_KEY_ENV;
    use crate::telemetry::exporters::ExportProtocol;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();

        assert_eq!(config.server.listen_address(), crate::DEFAULT_LISTEN_ADDRESS);
        assert!(config.server.health.enabled);
        assert_eq!(config.server.health.path, "/health");
        assert_eq!(config.server.cors.origins, AnyOrArray::Any);
        assert!(config.providers.google.api_key.is_none());
        assert!(config.telemetry.is_none());
    }

    #[test]
    fn full_document_parses() {
        temp_env::with_var("PARLEY_LOADER_GEMINI", Some("gemini-secret"), || {
            let raw = r#"
                [server]
                listen_address = "127.0.0.1:9100"

                [server.health]
                path = "/healthz"

                [server.cors]
                origins = ["http://localhost:3000"]
                credentials = true

                [providers.google]
                api_key = "{{ env.PARLEY_LOADER_GEMINI }}"
                base_url = "http://localhost:1234/v1beta"

                [providers.huggingface]
                api_key_env = "HF_TOKEN"

                [telemetry]
                service_name = "parley-test"

                [telemetry.exporter]
                endpoint = "http://localhost:4318"
                protocol = "http_proto"

                [telemetry.tracing]
                sampling_rate = 0.25
            "#;

            let config = Config::from_toml(raw).unwrap();

            assert_eq!(config.server.listen_address().port(), 9100);
            assert_eq!(config.server.health.path, "/healthz");
            assert!(config.server.cors.credentials);

            let google = &config.providers.google;
            assert_eq!(google.api_key.as_ref().unwrap().expose_secret(), "gemini-secret");
            assert_eq!(google.base_url.as_ref().unwrap().as_str(), "http://localhost:1234/v1beta");

            let hf = config.providers.huggingface.credential(HUGGINGFACE_API_KEY_ENV);
            assert_eq!(hf.env_name(), "HF_TOKEN");

            let telemetry = config.telemetry.unwrap();
            assert_eq!(telemetry.service_name, "parley-test");
            assert_eq!(telemetry.trace_exporter().unwrap().protocol, ExportProtocol::HttpProto);
        });
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::from_toml("[providers.openai]\napi_key = \"x\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn relative_health_path_is_rejected() {
        let err = Config::from_toml("[server.health]\npath = \"health\"").unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn credentials_with_wildcard_origin_are_rejected() {
        let err = Config::from_toml("[server.cors]\ncredentials = true").unwrap_err();
        assert!(err.to_string().contains("wildcard origins"));
    }

    #[test]
    fn sampling_rate_out_of_range_is_rejected() {
        let raw = "[telemetry.tracing]\nsampling_rate = 1.5";
        let err = Config::from_toml(raw).unwrap_err();
        assert!(err.to_string().contains("sampling_rate"));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nlisten_address = \"127.0.0.1:8123\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.listen_address().port(), 8123);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn load_or_default_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("parley.toml")).unwrap();
        assert_eq!(config.server.listen_address(), crate::DEFAULT_LISTEN_ADDRESS);
    }
}
