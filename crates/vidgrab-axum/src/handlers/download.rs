//! Download handler.

use axum::Json;
use axum::extract::State;
use tokio_util::sync::CancellationToken;
use vidgrab_core::{DownloadRequest, DownloadResponse};

use crate::error::HttpError;
use crate::state::AppState;

/// Run a download and answer when it has finished.
///
/// If the client goes away, Axum drops this future; the drop guard then
/// cancels the token and the engine process is stopped.
pub async fn download(
    State(state): State<AppState>,
    Json(req): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, HttpError> {
    tracing::debug!(
        target: "vidgrab.http",
        url = %req.url,
        options = ?req.options,
        output_dir = req.output_dir_key(),
        "Download requested"
    );

    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    let response = state.downloads.download(req, cancel).await?;
    Ok(Json(response))
}
