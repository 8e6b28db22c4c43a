//! Extraction engine port.
//!
//! The engine resolves a media URL, negotiates formats, downloads, and runs
//! post-processors. vidgrab only configures and invokes it.

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::EngineConfig;

/// Metadata the engine reports for a finished extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedInfo {
    pub title: Option<String>,
    /// Duration in seconds, as the engine reported it (integer or float).
    pub duration: Option<serde_json::Number>,
    /// Output path computed by the engine from the name template.
    pub filename: String,
}

/// Errors raised by an engine implementation.
///
/// `Failed` carries the engine's own message verbatim; it is what clients see.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to start extraction engine: {0}")]
    Spawn(String),

    #[error("{0}")]
    Failed(String),

    #[error("Unexpected engine output: {0}")]
    Protocol(String),

    #[error("Extraction cancelled")]
    Cancelled,
}

/// A configuration-driven "extract and optionally download" operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Extract `url` according to `config`.
    ///
    /// Returns `Ok(None)` when the engine produced no metadata. Progress is
    /// reported through `config.progress`. Implementations must stop work
    /// promptly once `cancel` fires.
    async fn extract(
        &self,
        url: &str,
        config: &EngineConfig,
        cancel: CancellationToken,
    ) -> Result<Option<ExtractedInfo>, EngineError>;
}
