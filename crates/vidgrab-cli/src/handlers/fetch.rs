//! Fetch command handler.
//!
//! Runs one download through the same `DownloadService` the HTTP adapter
//! uses, with terminal progress and Ctrl+C cancellation.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use vidgrab_core::{DownloadRequest, DownloadResponse, ProgressCallback, ProgressUpdate};

use crate::bootstrap::CliContext;
use crate::progress::CliProgressPrinter;

/// Execute the fetch command.
pub async fn execute(
    ctx: &CliContext,
    url: String,
    options: Vec<String>,
    output_dir: Option<String>,
    json: bool,
) -> Result<()> {
    let mut request = DownloadRequest::new(url, options);
    if let Some(dir) = output_dir {
        request = request.with_output_dir(dir);
    }

    let printer = Arc::new(Mutex::new(CliProgressPrinter::new(&request.url)));
    let observer: ProgressCallback = {
        let printer = Arc::clone(&printer);
        Arc::new(move |update: ProgressUpdate| {
            if let Ok(mut printer) = printer.lock() {
                printer.update(update.downloaded, update.effective_total());
            }
        })
    };

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let result = ctx
        .download_service()
        .download_with_progress(request, cancel, Some(observer))
        .await;

    ctrl_c.abort();
    if let Ok(mut printer) = printer.lock() {
        printer.finish();
    }

    let response = result?;
    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_summary(&response);
    }
    Ok(())
}

fn print_summary(response: &DownloadResponse) {
    println!("{}", response.message);
    println!("  Title:    {}", response.title);
    println!("  File:     {}", response.filename);
    println!("  Duration: {}", response.duration);
}
