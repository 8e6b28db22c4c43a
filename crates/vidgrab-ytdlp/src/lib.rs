//! # vidgrab-ytdlp
//!
//! Runs yt-dlp as a subprocess and implements
//! [`ExtractionEngine`](vidgrab_core::ExtractionEngine) on top of it.
//!
//! - `args` - `EngineConfig` to yt-dlp command line
//! - `progress` - parsing of the progress template lines
//! - `info` - parsing of the `--dump-single-json` document
//! - `engine` - process orchestration, cancellation and error mapping
//! - `locate` - executable discovery

mod args;
mod engine;
mod info;
mod locate;
mod progress;

pub use args::{PROGRESS_PREFIX, build_args, progress_template};
pub use engine::YtDlpEngine;
pub use info::parse_info;
pub use locate::{FFMPEG_BINARY, LocateError, YTDLP_BINARY, locate_ffmpeg, locate_ytdlp};
pub use progress::parse_progress_line;
