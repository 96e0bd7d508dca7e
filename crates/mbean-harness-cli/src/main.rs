//! CLI entry point.
//!
//! Loads `.env`, parses arguments, installs logging and runs the control
//! service until Ctrl-C.

use clap::Parser;
use tracing::info;

use mbean_harness_axum::start_server;
use mbean_harness_cli::{Cli, OPTS_ENV, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let opts = std::env::var(OPTS_ENV).ok();
    info!("{}={}", OPTS_ENV, opts.as_deref().unwrap_or("null"));

    start_server(cli.server_config()).await
}
