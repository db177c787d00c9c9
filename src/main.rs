//! CLI entry point for gamezipper.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{debug, info};

mod app;
mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let Some(entry_id) = args.entry_id.clone() else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = app::terminal::resolve_default_log_level(args.verbose, args.quiet);
    app::terminal::init_tracing(default_level);

    debug!(?args, "CLI arguments parsed");
    info!(entry_id = %entry_id, "Gamezipper starting");

    app::runtime::run_gamezipper(&args, &entry_id).await
}
