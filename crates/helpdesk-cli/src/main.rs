//! Helpdesk CLI - command-line administration for the helpdesk ticketing system.
//!
//! Every backend call goes through the authenticated client in
//! `helpdesk-core`: the stored token is attached automatically and a 401
//! ends the session, sending the user back to `helpdesk login`.

mod app;
mod cli;
mod commands;
mod output;
mod router;

use std::io;

use anyhow::Result;
use clap::Parser;
use helpdesk_core::Config;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use cli::Cli;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // RUST_LOG controls the level (e.g. RUST_LOG=helpdesk_core=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        Config::default()
    });

    let mut app = App::new(config, cli.api_url, cli.json)?;
    debug!(base_url = %app.api.base_url(), "Starting");
    let result = commands::run(&mut app, cli.command).await;
    debug!(route = %app.router.current(), "Finished");
    result
}
