//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use bailout_config::{Config, HealthConfig, ProbeConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig {
                        enabled: true,
                        ..HealthConfig::default()
                    },
                    probe: ProbeConfig::default(),
                },
                ..Config::default()
            },
        }
    }

    /// Enable the status probe under its default path
    pub fn with_probe(mut self) -> Self {
        self.config.server.probe.enabled = true;
        self
    }

    /// Enable the status probe under a custom path
    pub fn with_probe_path(mut self, path: &str) -> Self {
        self.config.server.probe = ProbeConfig {
            enabled: true,
            path: path.to_owned(),
        };
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
