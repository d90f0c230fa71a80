use std::net::SocketAddr;

use serde::Deserialize;

use crate::{health::HealthConfig, probe::ProbeConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub listen_address: Option<SocketAddr>,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
}
