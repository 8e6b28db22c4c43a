//! CLI bootstrap - the composition root.
//!
//! This module is the only place where the yt-dlp engine is chosen and wired
//! to the download settings. Handlers receive the composed [`CliContext`].

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use vidgrab_core::{DownloadService, DownloadSettings, ExtractionEngine, Settings};
use vidgrab_ytdlp::{YtDlpEngine, locate_ffmpeg, locate_ytdlp};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub settings: Settings,
}

impl CliConfig {
    pub const fn new(settings: Settings) -> Self {
        Self { settings }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    engine: Arc<YtDlpEngine>,
    download_settings: DownloadSettings,
}

impl CliContext {
    pub fn engine(&self) -> Arc<dyn ExtractionEngine> {
        self.engine.clone()
    }

    pub const fn download_settings(&self) -> &DownloadSettings {
        &self.download_settings
    }

    /// A download service over the configured engine.
    pub fn download_service(&self) -> DownloadService {
        DownloadService::new(self.engine(), self.download_settings.clone())
    }
}

/// Build the engine from settings.
pub fn build_engine(settings: &Settings) -> Result<YtDlpEngine> {
    let program = locate_ytdlp(settings.ytdlp_path.as_deref())?;
    let ffmpeg = locate_ffmpeg(settings.ffmpeg_location.as_deref());

    if settings.ffmpeg_location.is_some() && ffmpeg.is_none() {
        tracing::warn!(
            target: "vidgrab.ytdlp",
            "Configured ffmpeg location was not found; letting yt-dlp search for it"
        );
    }

    Ok(YtDlpEngine::new(program)
        .with_base_args(settings.ytdlp_args.iter().cloned())
        .with_ffmpeg_location(ffmpeg))
}

/// Validate settings and compose the context.
pub fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let download_settings = config
        .settings
        .download_settings()
        .context("Invalid download settings")?;
    let engine = build_engine(&config.settings)?;

    info!(
        target: "vidgrab.ytdlp",
        program = %engine.program().display(),
        ffmpeg = ?engine.ffmpeg_location(),
        "Using yt-dlp"
    );

    Ok(CliContext {
        engine: Arc::new(engine),
        download_settings,
    })
}
