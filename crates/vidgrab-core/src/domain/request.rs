//! Request and response shapes for a single download.
//!
//! These are the wire types of `POST /download/`; they are defined here so the
//! CLI and the HTTP adapter produce byte-identical JSON.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::ports::ExtractedInfo;

/// `output_dir` value that selects the server-side default directory.
pub const DEFAULT_OUTPUT_DIR_KEY: &str = "default";

/// Response message when the engine finished normally.
pub const MSG_DOWNLOAD_COMPLETED: &str = "Download completed successfully";

/// Response message when subtitles were requested but none landed on disk.
pub const MSG_NO_SUBTITLES: &str = "No subtitles found for the requested language";

/// Placeholder for metadata the engine did not report.
pub const UNKNOWN: &str = "Unknown";

/// A download request as received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    /// Media URL handed to the engine.
    pub url: String,
    /// Command-line style flags, interpreted positionally.
    pub options: Vec<String>,
    /// Target directory, or `"default"`. Missing and `null` both mean default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

impl DownloadRequest {
    /// Create a request targeting the default directory.
    pub fn new(url: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            url: url.into(),
            options,
            output_dir: None,
        }
    }

    /// Set an explicit output directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The directory key to resolve (`"default"` when none was given).
    pub fn output_dir_key(&self) -> &str {
        self.output_dir.as_deref().unwrap_or(DEFAULT_OUTPUT_DIR_KEY)
    }
}

/// Media duration as reported back to clients.
///
/// Serializes as the engine's number verbatim, or as the string `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaDuration {
    Seconds(serde_json::Number),
    Unknown,
}

impl From<Option<serde_json::Number>> for MediaDuration {
    fn from(value: Option<serde_json::Number>) -> Self {
        value.map_or(Self::Unknown, Self::Seconds)
    }
}

impl fmt::Display for MediaDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seconds(n) => write!(f, "{n}s"),
            Self::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for MediaDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Seconds(n) => n.serialize(serializer),
            Self::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

/// Successful download outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResponse {
    pub message: String,
    pub title: String,
    pub filename: String,
    pub duration: MediaDuration,
}

impl DownloadResponse {
    /// Build a response from engine metadata.
    pub fn from_info(message: &str, info: ExtractedInfo) -> Self {
        Self {
            message: message.to_string(),
            title: info.title.unwrap_or_else(|| UNKNOWN.to_string()),
            filename: info.filename,
            duration: info.duration.into(),
        }
    }
}
