//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;
use vidgrab_axum::{CorsConfig, bootstrap, create_router};
use vidgrab_core::{
    DownloadSettings, EngineConfig, EngineError, ExtractedInfo, ExtractionEngine, OutputDirPolicy,
};

/// What the fake engine does when called.
pub enum Behavior {
    /// Return metadata.
    Info(ExtractedInfo),
    /// Write a subtitle file into the output directory, then return metadata.
    InfoWithSubtitle(ExtractedInfo),
    /// Return no metadata.
    Empty,
    /// Fail with the given engine message.
    Fail(String),
    /// Block until cancelled.
    Hang,
}

/// In-process stand-in for yt-dlp.
pub struct FakeEngine {
    behavior: Behavior,
    calls: AtomicUsize,
    last_config: Mutex<Option<EngineConfig>>,
    pub started: Notify,
    cancelled: AtomicBool,
}

impl FakeEngine {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_config: Mutex::new(None),
            started: Notify::new(),
            cancelled: AtomicBool::new(false),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_config(&self) -> Option<EngineConfig> {
        self.last_config.lock().unwrap().clone()
    }

    pub fn was_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionEngine for FakeEngine {
    async fn extract(
        &self,
        _url: &str,
        config: &EngineConfig,
        cancel: CancellationToken,
    ) -> Result<Option<ExtractedInfo>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_config.lock().unwrap() = Some(config.clone());
        self.started.notify_one();

        match &self.behavior {
            Behavior::Info(info) => Ok(Some(info.clone())),
            Behavior::InfoWithSubtitle(info) => {
                tokio::fs::write(config.output_dir.join("clip.en.vtt"), "WEBVTT\n")
                    .await
                    .unwrap();
                Ok(Some(info.clone()))
            }
            Behavior::Empty => Ok(None),
            Behavior::Fail(message) => Err(EngineError::Failed(message.clone())),
            Behavior::Hang => {
                cancel.cancelled().await;
                self.cancelled.store(true, Ordering::SeqCst);
                Err(EngineError::Cancelled)
            }
        }
    }
}

pub fn sample_info() -> ExtractedInfo {
    ExtractedInfo {
        title: Some("Sample Clip".to_string()),
        duration: Some(serde_json::Number::from(42)),
        filename: "/media/Sample Clip.mp4".to_string(),
    }
}

/// Router over a fake engine, confined to `root` with `root/downloads` as default.
pub fn test_app(engine: Arc<FakeEngine>, root: &Path, cors: &CorsConfig) -> Router {
    let policy = OutputDirPolicy::new(root.join("downloads"), root).unwrap();
    let settings = DownloadSettings::new(policy, Duration::from_secs(30));
    create_router(bootstrap(engine, settings), cors)
}

pub fn json_request(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Send a request and decode the JSON response.
pub async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}
