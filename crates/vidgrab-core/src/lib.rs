//! # vidgrab-core
//!
//! Domain types and ports for the vidgrab download service.
//!
//! - `domain` - request/response shapes and the typed engine configuration
//! - `options` - translation of command-line style flags into `EngineConfig`
//! - `paths` - output directory resolution and confinement
//! - `ports` - the `ExtractionEngine` abstraction implemented by adapters
//! - `services` - `DownloadService`, the per-request orchestration
//!
//! This crate never spawns processes or binds sockets; adapters
//! (`vidgrab-ytdlp`, `vidgrab-axum`) supply those.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod options;
pub mod paths;
pub mod ports;
pub mod progress;
pub mod services;
pub mod settings;

#[cfg(test)]
use tempfile as _;

pub use domain::{
    DEFAULT_AUDIO_CODEC, DEFAULT_AUDIO_QUALITY, DEFAULT_OUTPUT_DIR_KEY, DownloadRequest,
    DownloadResponse, EngineConfig, MSG_DOWNLOAD_COMPLETED, MSG_NO_SUBTITLES, MediaDuration,
    OUTPUT_NAME_TEMPLATE, PostProcessor, SUBTITLE_FORMAT, SubtitleOptions, UNKNOWN,
};
pub use options::{OptionsError, ParsedOptions, parse_options};
pub use paths::{OutputDirError, OutputDirPolicy, contains_subtitle_files, default_output_dir};
pub use ports::{EngineError, ExtractedInfo, ExtractionEngine};
pub use progress::{DownloadProgress, ProgressCallback, ProgressSnapshot, ProgressUpdate};
pub use services::{DownloadError, DownloadService, DownloadSettings};
pub use settings::{DEFAULT_DOWNLOAD_TIMEOUT_SECS, Settings, SettingsError, validate_settings};
