//! Main commands enum and shared settings arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use vidgrab_axum::bootstrap::{DEFAULT_HOST, DEFAULT_PORT};
use vidgrab_core::Settings;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP download service
    Serve {
        /// Interface to bind
        #[arg(long, env = "VIDGRAB_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "VIDGRAB_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Allowed CORS origins (comma separated, `*` for any)
        #[arg(long = "cors-origin", env = "VIDGRAB_CORS_ORIGINS", value_delimiter = ',')]
        cors_origins: Vec<String>,
    },

    /// Download a single URL in the foreground
    Fetch {
        /// Output directory ("default", a path under the output root, or relative to it)
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Media URL
        url: String,

        /// yt-dlp style options, e.g. `-x --audio-format mp3`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        options: Vec<String>,
    },

    /// Check that yt-dlp and ffmpeg are available
    CheckDeps,

    /// Show resolved output directories
    Paths,
}

/// Settings shared by every command, from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Directory used for `output_dir: "default"`
    #[arg(long = "default-dir", env = "VIDGRAB_DEFAULT_DIR", global = true)]
    pub default_dir: Option<PathBuf>,

    /// Root that every output directory must stay under
    #[arg(long = "output-root", env = "VIDGRAB_OUTPUT_ROOT", global = true)]
    pub output_root: Option<PathBuf>,

    /// Seconds before a download is cancelled
    #[arg(long = "timeout", env = "VIDGRAB_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// yt-dlp executable (default: looked up on PATH)
    #[arg(long = "yt-dlp", env = "VIDGRAB_YTDLP", global = true)]
    pub ytdlp: Option<PathBuf>,

    /// Extra argument placed before yt-dlp's own (repeatable), e.g. `-m yt_dlp`
    #[arg(long = "yt-dlp-arg", global = true, allow_hyphen_values = true)]
    pub ytdlp_args: Vec<String>,

    /// ffmpeg binary or directory handed to yt-dlp
    #[arg(long = "ffmpeg", env = "VIDGRAB_FFMPEG", global = true)]
    pub ffmpeg: Option<PathBuf>,
}

impl SettingsArgs {
    pub fn to_settings(&self) -> Settings {
        Settings {
            default_output_dir: self.default_dir.clone(),
            output_root: self.output_root.clone(),
            download_timeout_secs: self.timeout_secs,
            ytdlp_path: self.ytdlp.clone(),
            ytdlp_args: self.ytdlp_args.clone(),
            ffmpeg_location: self.ffmpeg.clone(),
        }
    }
}
