//! Application services.
//!
//! Services orchestrate the domain and ports; adapters call into them and
//! never talk to the engine directly.

mod download_service;

pub use download_service::{DownloadError, DownloadService, DownloadSettings};
