//! Command-line arguments.

use clap::Parser;

use mbean_harness_axum::ServerConfig;
use mbean_harness_axum::bootstrap::{DEFAULT_HOST, DEFAULT_PORT};

/// Process-option string logged at startup for diagnostics.
pub const OPTS_ENV: &str = "MBEAN_HARNESS_OPTS";

/// Command-line interface for the harness launcher.
#[derive(Debug, Parser)]
#[command(name = "mbean-harness")]
#[command(about = "Register and clear test MBeans over HTTP")]
#[command(version)]
pub struct Cli {
    /// Interface to listen on
    #[arg(long, env = "MBEAN_HARNESS_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "MBEAN_HARNESS_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Enable debug output (RUST_LOG still takes precedence)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::with_defaults()
            .with_host(self.host.clone())
            .with_port(self.port)
    }
}
