use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if route paths are malformed or collide, or the
    /// trace exporter endpoint is not an HTTP(S) URL
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_routes()?;
        self.validate_exporter()?;
        Ok(())
    }

    /// Ensure built-in routes are well-formed and do not overlap
    fn validate_routes(&self) -> anyhow::Result<()> {
        let health = &self.server.health;
        let probe = &self.server.probe;

        if health.enabled && !health.path.starts_with('/') {
            anyhow::bail!("server.health.path must start with '/': {}", health.path);
        }

        if probe.enabled {
            if !probe.path.starts_with('/') || probe.base_path().is_empty() {
                anyhow::bail!("server.probe.path must start with '/' and not be the root: {}", probe.path);
            }

            if health.enabled && health.path.trim_end_matches('/') == probe.base_path() {
                anyhow::bail!("server.health.path and server.probe.path must differ");
            }
        }

        Ok(())
    }

    /// Ensure the OTLP endpoint speaks HTTP
    fn validate_exporter(&self) -> anyhow::Result<()> {
        if let Some(ref exporter) = self.telemetry.exporter {
            if !matches!(exporter.endpoint.scheme(), "http" | "https") {
                anyhow::bail!("telemetry.exporter.endpoint must be an http(s) URL: {}", exporter.endpoint);
            }

            if !(0.0..=1.0).contains(&exporter.sampling_rate) {
                anyhow::bail!("telemetry.exporter.sampling_rate must be between 0.0 and 1.0");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::{Config, LogTarget};

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert!(config.server.listen_address.is_none());
        assert!(config.server.health.enabled);
        assert!(!config.server.probe.enabled);
        assert_eq!(config.recovery.sink, LogTarget::Tracing);
        assert_eq!(config.recovery.prefix, "[web] ");
    }

    #[test]
    fn full_file() {
        let toml = r#"
            [server]
            listen_address = "127.0.0.1:8080"

            [server.health]
            path = "/healthz"

            [server.probe]
            enabled = true

            [recovery]
            sink = "stderr"

            [telemetry]
            log_filter = "debug"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.listen_address.unwrap().port(), 8080);
        assert_eq!(config.server.health.path, "/healthz");
        assert!(config.server.probe.enabled);
        assert_eq!(config.recovery.sink, LogTarget::Stderr);
        assert_eq!(config.telemetry.log_filter, "debug");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = Config::parse("[recovery]\nlevel = \"warn\"").unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
    }

    #[test]
    fn colliding_routes_are_rejected() {
        let toml = r#"
            [server.health]
            path = "/status"

            [server.probe]
            enabled = true
        "#;

        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn root_probe_path_is_rejected() {
        let toml = r#"
            [server.probe]
            enabled = true
            path = "/"
        "#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn slash_only_probe_paths_are_rejected() {
        for path in ["//", "///"] {
            let toml = format!("[server.probe]\nenabled = true\npath = \"{path}\"");
            let err = Config::parse(&toml).unwrap_err();
            assert!(err.to_string().contains("not be the root"), "{path}: {err}");
        }
    }

    #[test]
    fn trailing_slash_does_not_hide_route_collision() {
        let toml = r#"
            [server.health]
            path = "/status"

            [server.probe]
            enabled = true
            path = "/status/"
        "#;

        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn non_http_exporter_is_rejected() {
        let toml = r#"
            [telemetry.exporter]
            endpoint = "unix:///tmp/otel.sock"
        "#;

        let err = Config::parse(toml).unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn load_expands_env_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[recovery]\nprefix = \"{{{{ env.BAILOUT_TEST_PREFIX }}}}\"").unwrap();

        temp_env::with_var("BAILOUT_TEST_PREFIX", Some("[svc] "), || {
            let config = Config::load(file.path()).unwrap();
            assert_eq!(config.recovery.prefix, "[svc] ");
        });
    }

    #[test]
    fn example_file_is_valid() {
        temp_env::with_var_unset("BAILOUT_LOG_PREFIX", || {
            let config = Config::parse(include_str!("../../../bailout.example.toml")).unwrap();
            assert_eq!(config.recovery.sink, LogTarget::Stdout);
            assert_eq!(config.recovery.prefix, "[web] ");
            assert!(config.telemetry.exporter.is_none());
        });
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load(std::path::Path::new("/nonexistent/bailout.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
