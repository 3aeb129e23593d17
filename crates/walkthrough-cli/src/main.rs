//! Walkthrough CLI Application
//!
//! Terminal player and inspector for the guided walkthrough.

mod args;
mod cli;
mod player;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use walkthrough_core::{Catalog, WalkthroughBuilder};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        catalog,
        command,
    } = Args::parse();

    let mut builder = WalkthroughBuilder::new().with_database_path(database_file);
    if let Some(path) = catalog {
        let catalog = Catalog::from_json_file(&path)
            .with_context(|| format!("Failed to load catalog {}", path.display()))?;
        builder = builder.with_catalog(catalog);
    }
    let walkthrough = builder
        .build()
        .await
        .context("Failed to initialize walkthrough")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(walkthrough, renderer);

    info!("Walkthrough CLI started");

    match command {
        Some(Play(args)) => cli.play(&args).await,
        Some(Steps(args)) => cli.list_steps(args.phase.as_deref()),
        Some(Show(args)) => cli.show_step(args.id),
        Some(Phases) => cli.list_phases(),
        Some(Resolve(args)) => cli.resolve(&args),
        Some(Status) => cli.status(),
        Some(Reset) => cli.reset(),
        Some(Prefer(args)) => cli.prefer(args.preference),
        None => cli.auto_start().await,
    }
}
