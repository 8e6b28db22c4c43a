//! Settings domain types and validation.
//!
//! Settings are plain data; the CLI fills them from flags and environment
//! variables and turns them into [`DownloadSettings`] at startup.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths::{OutputDirError, OutputDirPolicy, default_output_dir};
use crate::services::DownloadSettings;

/// Default upper bound for one engine invocation (one hour).
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 3600;

/// Errors from validating or applying settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Download timeout must be greater than zero")]
    InvalidTimeout,

    #[error(transparent)]
    Path(#[from] OutputDirError),
}

/// Service settings.
///
/// All fields are optional to support graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory used when a request asks for `"default"`.
    pub default_output_dir: Option<PathBuf>,

    /// Every output directory must live under this root.
    /// Falls back to the default output directory.
    pub output_root: Option<PathBuf>,

    /// Seconds before a running download is cancelled.
    pub download_timeout_secs: Option<u64>,

    /// Path to the yt-dlp executable (looked up on `PATH` when unset).
    pub ytdlp_path: Option<PathBuf>,

    /// Arguments placed before the generated ones, e.g. `-m yt_dlp`
    /// when `ytdlp_path` is a Python interpreter.
    pub ytdlp_args: Vec<String>,

    /// Directory or binary passed to yt-dlp as `--ffmpeg-location`.
    pub ffmpeg_location: Option<PathBuf>,
}

impl Settings {
    /// Effective timeout (with default fallback).
    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(
            self.download_timeout_secs
                .unwrap_or(DEFAULT_DOWNLOAD_TIMEOUT_SECS),
        )
    }

    /// Effective default directory (platform download dir when unset).
    pub fn effective_default_dir(&self) -> Result<PathBuf, OutputDirError> {
        self.default_output_dir
            .clone()
            .map_or_else(default_output_dir, Ok)
    }

    /// Effective root (the default directory when unset).
    pub fn effective_root(&self) -> Result<PathBuf, OutputDirError> {
        self.output_root
            .clone()
            .map_or_else(|| self.effective_default_dir(), Ok)
    }

    /// Build the output directory policy.
    pub fn output_policy(&self) -> Result<OutputDirPolicy, SettingsError> {
        Ok(OutputDirPolicy::new(
            self.effective_default_dir()?,
            self.effective_root()?,
        )?)
    }

    /// Validate and convert into service settings.
    pub fn download_settings(&self) -> Result<DownloadSettings, SettingsError> {
        validate_settings(self)?;
        Ok(DownloadSettings::new(
            self.output_policy()?,
            self.effective_timeout(),
        ))
    }
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.download_timeout_secs == Some(0) {
        return Err(SettingsError::InvalidTimeout);
    }
    settings.output_policy().map(|_| ())
}
