//! Stockroom Binary
//!
//! Interactive menu by default, or one-shot commands for scripting.

use std::io;

use clap::Parser;
use stockroom::cli::{self, Args};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    // Logs go to stderr so the menu owns stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stockroom=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let stdin = io::stdin();
    if let Err(e) = cli::run(args, stdin.lock(), io::stdout()) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
