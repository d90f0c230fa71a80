#![allow(clippy::must_use_candidate)]

mod env;
pub mod health;
mod loader;
pub mod probe;
pub mod recovery;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use env::ExpandError;
pub use health::*;
pub use probe::*;
pub use recovery::*;
pub use server::*;
pub use telemetry::*;

/// Top-level bailout configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and built-in routes
    #[serde(default)]
    pub server: ServerConfig,
    /// Recovery boundary log sink
    #[serde(default)]
    pub recovery: RecoveryConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
