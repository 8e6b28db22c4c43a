//! Axum server bootstrap.
//!
//! Wires an [`ExtractionEngine`] into a [`DownloadService`] and serves it.
//! Which engine to use is decided by the caller (the CLI).

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;
use vidgrab_core::{DownloadService, DownloadSettings, ExtractionEngine};

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8000;

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow every origin, method and header, with credentials.
    #[default]
    AllowAll,
    /// Allow specific origins.
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// `AllowAll` for an empty list or `*`, else the listed origins.
    pub fn from_origins(origins: Vec<String>) -> Self {
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            Self::AllowAll
        } else {
            Self::AllowOrigins(origins)
        }
    }
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` to bind. The host may be a name such as `localhost`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Download orchestration shared by all requests.
    pub downloads: Arc<DownloadService>,
}

/// Build the context from an engine and download settings.
pub fn bootstrap(engine: Arc<dyn ExtractionEngine>, settings: DownloadSettings) -> AxumContext {
    info!(
        target: "vidgrab.http",
        default_dir = %settings.policy.default_dir().display(),
        output_root = %settings.policy.root().display(),
        timeout_secs = settings.timeout.as_secs(),
        "Axum bootstrap resolved download settings"
    );

    AxumContext {
        downloads: Arc::new(DownloadService::new(engine, settings)),
    }
}

/// Bind and serve until Ctrl+C.
pub async fn start_server(config: ServerConfig, ctx: AxumContext) -> Result<()> {
    let app = crate::routes::create_router(ctx, &config.cors);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(target: "vidgrab.http", "vidgrab listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: "vidgrab.http", "Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
