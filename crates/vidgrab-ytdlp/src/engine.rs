//! yt-dlp process orchestration.
//!
//! One extraction is one yt-dlp process. Stdout carries the info JSON and
//! stderr carries diagnostics; progress lines may show up on either stream.
//! The child is killed as soon as the cancellation token fires.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::{ChildStderr, Command};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use vidgrab_core::{
    EngineConfig, EngineError, ExtractedInfo, ExtractionEngine, ProgressCallback,
};

use crate::args::build_args;
use crate::info::parse_info;
use crate::progress::parse_progress_line;

/// Stderr lines kept for error reporting.
const STDERR_TAIL_LINES: usize = 20;

/// Lines of the stderr tail shown when yt-dlp fails without an `ERROR:` line.
const FAILURE_CONTEXT_LINES: usize = 5;

const ERROR_PREFIX: &str = "ERROR:";
const WARNING_PREFIX: &str = "WARNING:";

/// [`ExtractionEngine`] backed by the yt-dlp command line program.
#[derive(Debug, Clone)]
pub struct YtDlpEngine {
    program: PathBuf,
    base_args: Vec<String>,
    ffmpeg_location: Option<PathBuf>,
}

impl YtDlpEngine {
    /// Engine that runs `program` directly.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
            ffmpeg_location: None,
        }
    }

    /// Arguments placed before the generated ones (e.g. `-m yt_dlp`).
    #[must_use]
    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_ffmpeg_location(mut self, location: Option<PathBuf>) -> Self {
        self.ffmpeg_location = location;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn ffmpeg_location(&self) -> Option<&Path> {
        self.ffmpeg_location.as_deref()
    }

    /// Full argument list for one extraction.
    pub fn command_args(&self, url: &str, config: &EngineConfig) -> Vec<OsString> {
        self.base_args
            .iter()
            .map(OsString::from)
            .chain(build_args(config, self.ffmpeg_location.as_deref(), url))
            .collect()
    }

    /// Report the installed yt-dlp version.
    pub async fn version(&self) -> Result<String, EngineError> {
        let output = Command::new(&self.program)
            .args(&self.base_args)
            .arg("--version")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(&e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EngineError::Failed(failure_reason(
                &stderr.lines().map(str::to_string).collect(),
                output.status,
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn spawn_error(&self, e: &std::io::Error) -> EngineError {
        EngineError::Spawn(format!("{}: {e}", self.program.display()))
    }
}

#[async_trait]
impl ExtractionEngine for YtDlpEngine {
    async fn extract(
        &self,
        url: &str,
        config: &EngineConfig,
        cancel: CancellationToken,
    ) -> Result<Option<ExtractedInfo>, EngineError> {
        let args = self.command_args(url, config);
        debug!(
            target: "vidgrab.ytdlp",
            program = %self.program.display(),
            ?args,
            "Spawning yt-dlp"
        );

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env("PYTHONUNBUFFERED", "1")
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(&e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::Protocol("Missing stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| EngineError::Protocol("Missing stderr".to_string()))?;

        let stderr_task = tokio::spawn(drain_stderr(stderr, config.progress.clone()));
        let mut stdout = BufReader::new(stdout);
        let mut buf = Vec::new();
        let mut document: Option<String> = None;

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    let _ = child.kill().await;
                    stderr_task.abort();
                    return Err(EngineError::Cancelled);
                }

                line = read_line_lossy(&mut stdout, &mut buf) => {
                    let line = line.map_err(|e| EngineError::Protocol(e.to_string()))?;
                    let Some(line) = line else { break; };
                    handle_stdout_line(line, config, &mut document);
                }
            }
        }

        let status = tokio::select! {
            () = cancel.cancelled() => {
                let _ = child.kill().await;
                stderr_task.abort();
                return Err(EngineError::Cancelled);
            }
            status = child.wait() => status.map_err(|e| EngineError::Protocol(e.to_string()))?,
        };

        let stderr_tail = stderr_task.await.unwrap_or_default();

        if !status.success() {
            let reason = failure_reason(&stderr_tail, status);
            debug!(target: "vidgrab.ytdlp", %status, %reason, "yt-dlp failed");
            return Err(EngineError::Failed(reason));
        }

        match document {
            Some(json) => parse_info(&json, &config.output_template),
            None => {
                warn!(target: "vidgrab.ytdlp", "yt-dlp exited without an info document");
                Ok(None)
            }
        }
    }
}

fn handle_stdout_line(line: String, config: &EngineConfig, document: &mut Option<String>) {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return;
    }
    if let Some(update) = parse_progress_line(trimmed) {
        config.report_progress(update);
    } else if trimmed.starts_with('{') || trimmed == "null" {
        *document = Some(line);
    } else {
        debug!(target: "vidgrab.ytdlp", "{trimmed}");
    }
}

/// Next line from `reader` with invalid UTF-8 replaced, or `None` at EOF.
///
/// Bytes read before a cancelled call stay in `buf` and are picked up by the
/// next call.
async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    reader.read_until(b'\n', buf).await?;
    if buf.is_empty() {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf)
        .trim_end_matches(['\r', '\n'])
        .to_string();
    buf.clear();
    Ok(Some(line))
}

/// Read stderr to the end, forwarding progress and keeping the last lines.
///
/// Reads to EOF whatever the content, so yt-dlp never writes to a closed pipe.
async fn drain_stderr(
    stderr: ChildStderr,
    progress: Option<ProgressCallback>,
) -> VecDeque<String> {
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let mut stderr = BufReader::new(stderr);
    let mut buf = Vec::new();

    while let Ok(Some(line)) = read_line_lossy(&mut stderr, &mut buf).await {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(update) = parse_progress_line(trimmed) {
            if let Some(callback) = &progress {
                callback(update);
            }
            continue;
        }

        if trimmed.starts_with(WARNING_PREFIX) {
            warn!(target: "vidgrab.ytdlp", "{trimmed}");
        } else {
            debug!(target: "vidgrab.ytdlp", "{trimmed}");
        }

        if tail.len() == STDERR_TAIL_LINES {
            tail.pop_front();
        }
        tail.push_back(trimmed.to_string());
    }
    tail
}

/// The last `ERROR:` line, else the last few stderr lines, else the exit status.
fn failure_reason(stderr_tail: &VecDeque<String>, status: ExitStatus) -> String {
    if let Some(line) = stderr_tail.iter().rev().find(|l| l.starts_with(ERROR_PREFIX)) {
        return line.clone();
    }
    if stderr_tail.is_empty() {
        return format!("yt-dlp exited with {status}");
    }
    let skip = stderr_tail.len().saturating_sub(FAILURE_CONTEXT_LINES);
    stderr_tail
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}
