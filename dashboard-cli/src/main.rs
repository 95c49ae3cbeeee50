//! Binary crate for the `dashboard` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Logging setup
//! - Choosing the output surface and reporting a failed run once

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,dashboard_core=debug,dashboard_cli=debug",
        _ => "warn,dashboard_core=trace,dashboard_cli=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);
    cmd.run().await
}
