//! CLI definitions for launch-dash.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "launch-dash",
    version,
    about = "SpaceX launch records dashboard",
    after_help = "Examples:\n  launch-dash                              # serve ./spacex_launch_dash.csv\n  launch-dash --data launches.csv serve\n  launch-dash summary                      # print launch counts and exit"
)]
pub struct Cli {
    /// Launch dataset CSV (overrides dataset.path).
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
    /// Listen address (overrides web.listen).
    #[arg(long, global = true)]
    pub listen: Option<String>,
    /// Configuration file (defaults to ./launch-dash.toml when present).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Serve the dashboard (default).
    Serve,
    /// Print launch counts per site and per class/site, then exit.
    Summary,
}
