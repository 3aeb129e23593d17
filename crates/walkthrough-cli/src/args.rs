use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use walkthrough_core::{PlaybackSpeed, SkipPreference};

/// Terminal player for the DeepSafe guided walkthrough
///
/// Plays a step catalog interactively: type commands such as `next`,
/// `play`, `open metrics-area` or `goto 7` on stdin. Without a command the
/// walkthrough starts only if the saved skip preference allows it.
#[derive(Parser)]
#[command(version, about, name = "wt")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/walkthrough/walkthrough.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// JSON step catalog to play instead of the built-in DeepSafe tour
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the walkthrough CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Play the walkthrough interactively
    #[command(alias = "p")]
    Play(PlayArgs),
    /// List steps, optionally restricted to one phase
    #[command(aliases = ["l", "ls"])]
    Steps(StepsArgs),
    /// Show one step in full
    #[command(alias = "s")]
    Show(ShowArgs),
    /// List phases with their steps
    Phases,
    /// Compute hotspot positions for a step against a layout file
    #[command(alias = "r")]
    Resolve(ResolveArgs),
    /// Show the saved completion flag, skip preference and progress
    Status,
    /// Forget all saved walkthrough state
    Reset,
    /// Set whether the walkthrough is offered automatically
    Prefer(PreferArgs),
}

/// Options for interactive playback
#[derive(ClapArgs, Default)]
pub struct PlayArgs {
    /// Initial playback speed: 0.5x, 1x, 1.5x or 2x
    #[arg(short, long)]
    pub speed: Option<PlaybackSpeed>,

    /// Continue from saved progress instead of starting over
    #[arg(long)]
    pub resume: bool,

    /// Skip the welcome screen and start playing immediately
    #[arg(long)]
    pub autoplay: bool,

    /// JSON layout file used to place hotspot markers
    #[arg(long)]
    pub layout: Option<PathBuf>,
}

#[derive(ClapArgs)]
pub struct StepsArgs {
    /// Only list steps of this phase
    #[arg(long)]
    pub phase: Option<String>,
}

#[derive(ClapArgs)]
pub struct ShowArgs {
    /// Step ID
    pub id: u32,
}

#[derive(ClapArgs)]
pub struct ResolveArgs {
    /// Step ID
    pub step: u32,

    /// JSON layout file with the viewport width and anchor rectangles
    #[arg(long)]
    pub layout: PathBuf,

    /// Override the viewport width from the layout file
    #[arg(long)]
    pub width: Option<f64>,
}

#[derive(ClapArgs)]
pub struct PreferArgs {
    /// always, never or ask
    pub preference: SkipPreference,
}
