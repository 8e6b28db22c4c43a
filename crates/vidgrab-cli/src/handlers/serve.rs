//! Serve command handler.

use anyhow::Result;
use vidgrab_axum::{CorsConfig, ServerConfig, bootstrap, start_server};

use crate::bootstrap::CliContext;

/// Run the HTTP service until interrupted.
pub async fn execute(
    ctx: &CliContext,
    host: String,
    port: u16,
    cors_origins: Vec<String>,
) -> Result<()> {
    let config = ServerConfig {
        host,
        port,
        cors: CorsConfig::from_origins(cors_origins),
    };

    let app = bootstrap(ctx.engine(), ctx.download_settings().clone());
    start_server(config, app).await
}
