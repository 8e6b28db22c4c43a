//! Main CLI parser and top-level argument handling.

use clap::Parser;

use crate::commands::{Commands, SettingsArgs};

/// Download media through yt-dlp, over HTTP or from the shell.
#[derive(Parser)]
#[command(name = "vidgrab")]
#[command(about = "HTTP front end for yt-dlp downloads")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
