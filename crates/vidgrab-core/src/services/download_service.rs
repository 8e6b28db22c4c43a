//! Per-request download orchestration.
//!
//! One call to [`DownloadService::download`] walks a request through
//! options → directory → config → engine → response. Any failure ends the
//! request; nothing is retried.
//!
//! The engine runs on its own Tokio task with a child cancellation token, so
//! a timeout or a caller cancellation can stop it without waiting for the
//! download to finish.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info};
use uuid::Uuid;

use crate::domain::{
    DownloadRequest, DownloadResponse, EngineConfig, MSG_DOWNLOAD_COMPLETED, MSG_NO_SUBTITLES,
};
use crate::options::{OptionsError, parse_options};
use crate::paths::{OutputDirError, OutputDirPolicy, contains_subtitle_files};
use crate::ports::{EngineError, ExtractedInfo, ExtractionEngine};
use crate::progress::{DownloadProgress, ProgressCallback, ProgressUpdate};

/// Time the engine gets to wind down after cancellation before its task is aborted.
const CANCEL_GRACE: Duration = Duration::from_secs(5);

/// Message for an engine that returned no metadata.
const EXTRACTION_FAILED: &str = "Failed to extract video information";

/// Settings for [`DownloadService`].
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    pub policy: OutputDirPolicy,
    /// Upper bound on a single engine invocation.
    pub timeout: Duration,
}

impl DownloadSettings {
    pub const fn new(policy: OutputDirPolicy, timeout: Duration) -> Self {
        Self { policy, timeout }
    }
}

/// Errors that end a download request.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Options(#[from] OptionsError),

    #[error(transparent)]
    OutputDir(#[from] OutputDirError),

    /// The engine finished without metadata.
    #[error("{}", EXTRACTION_FAILED)]
    ExtractionFailed,

    #[error(transparent)]
    Engine(EngineError),

    #[error("Download timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    #[error("Download cancelled")]
    Cancelled,

    #[error("Failed to inspect output directory {path}: {reason}")]
    Inspect { path: PathBuf, reason: String },

    #[error("Download task failed: {0}")]
    Task(String),
}

impl DownloadError {
    /// Whether the request itself was invalid, as opposed to a failure while serving it.
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::Options(_) => true,
            Self::OutputDir(e) => e.is_rejected_request(),
            _ => false,
        }
    }
}

impl From<EngineError> for DownloadError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Cancelled => Self::Cancelled,
            other => Self::Engine(other),
        }
    }
}

/// Runs download requests against an [`ExtractionEngine`].
pub struct DownloadService {
    engine: Arc<dyn ExtractionEngine>,
    settings: DownloadSettings,
}

impl DownloadService {
    pub fn new(engine: Arc<dyn ExtractionEngine>, settings: DownloadSettings) -> Self {
        Self { engine, settings }
    }

    /// Run one download to completion.
    pub async fn download(
        &self,
        request: DownloadRequest,
        cancel: CancellationToken,
    ) -> Result<DownloadResponse, DownloadError> {
        self.download_with_progress(request, cancel, None).await
    }

    /// Run one download, forwarding progress reports to `observer`.
    pub async fn download_with_progress(
        &self,
        request: DownloadRequest,
        cancel: CancellationToken,
        observer: Option<ProgressCallback>,
    ) -> Result<DownloadResponse, DownloadError> {
        let span = tracing::info_span!(
            target: "vidgrab.download",
            "download",
            id = %Uuid::new_v4(),
            url = %request.url,
        );

        let result = self.run(request, cancel, observer).instrument(span.clone()).await;
        if let Err(ref e) = result {
            span.in_scope(|| {
                error!(
                    target: "vidgrab.download",
                    error = %e,
                    detail = ?e,
                    "An error occurred during download"
                );
            });
        }
        result
    }

    async fn run(
        &self,
        request: DownloadRequest,
        cancel: CancellationToken,
        observer: Option<ProgressCallback>,
    ) -> Result<DownloadResponse, DownloadError> {
        let options = parse_options(&request.options)?;
        if !options.unrecognized.is_empty() {
            debug!(
                target: "vidgrab.download",
                ignored = ?options.unrecognized,
                "Ignoring unrecognized options"
            );
        }

        let output_dir = self
            .settings
            .policy
            .prepare(request.output_dir_key())
            .await?;

        let progress = Arc::new(DownloadProgress::new());
        let config = EngineConfig::from_options(&output_dir, &options)
            .with_progress(progress_sink(&progress, observer));
        info!(target: "vidgrab.download", options = %config.summary(), "Download options");

        let writes_subtitles = config.writes_subtitles();
        let info = self.invoke_engine(request.url, config, &cancel).await;

        let snapshot = progress.snapshot();
        debug!(
            target: "vidgrab.download",
            downloaded = snapshot.downloaded,
            total = snapshot.total,
            "Final progress"
        );

        let info = info?.ok_or(DownloadError::ExtractionFailed)?;

        let message = if writes_subtitles && !has_subtitles(&output_dir).await? {
            MSG_NO_SUBTITLES
        } else {
            MSG_DOWNLOAD_COMPLETED
        };

        info!(
            target: "vidgrab.download",
            filename = %info.filename,
            outcome = message,
            "Download finished"
        );
        Ok(DownloadResponse::from_info(message, info))
    }

    async fn invoke_engine(
        &self,
        url: String,
        config: EngineConfig,
        cancel: &CancellationToken,
    ) -> Result<Option<ExtractedInfo>, DownloadError> {
        let engine = Arc::clone(&self.engine);
        let token = cancel.child_token();
        let task_token = token.clone();
        let mut handle =
            tokio::spawn(async move { engine.extract(&url, &config, task_token).await });

        let timeout = self.settings.timeout;
        tokio::select! {
            joined = &mut handle => match joined {
                Ok(result) => result.map_err(DownloadError::from),
                Err(e) => Err(DownloadError::Task(e.to_string())),
            },
            () = tokio::time::sleep(timeout) => {
                token.cancel();
                let _ = tokio::time::timeout(CANCEL_GRACE, &mut handle).await;
                handle.abort();
                Err(DownloadError::Timeout(timeout))
            }
            () = cancel.cancelled() => {
                let _ = tokio::time::timeout(CANCEL_GRACE, &mut handle).await;
                handle.abort();
                Err(DownloadError::Cancelled)
            }
        }
    }
}

fn progress_sink(
    progress: &Arc<DownloadProgress>,
    observer: Option<ProgressCallback>,
) -> ProgressCallback {
    let record = progress.callback();
    match observer {
        None => record,
        Some(observer) => Arc::new(move |update: ProgressUpdate| {
            record(update);
            observer(update);
        }),
    }
}

async fn has_subtitles(dir: &std::path::Path) -> Result<bool, DownloadError> {
    contains_subtitle_files(dir)
        .await
        .map_err(|e| DownloadError::Inspect {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })
}
