use std::path::PathBuf;

use clap::Parser;

/// Bailout HTTP server
#[derive(Debug, Parser)]
#[command(name = "bailout", about = "HTTP server that turns structured request aborts into responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "BAILOUT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "BAILOUT_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Override the log filter (e.g. `debug`, `bailout=trace`)
    #[arg(long, env = "BAILOUT_LOG")]
    pub log_filter: Option<String>,
}
