//! Download progress counters.
//!
//! The engine reports cumulative byte counts through a [`ProgressCallback`].
//! [`DownloadProgress`] is the default sink: two atomics that any thread can
//! update and read without locking.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Callback invoked by the engine while bytes arrive.
pub type ProgressCallback = Arc<dyn Fn(ProgressUpdate) + Send + Sync>;

/// One progress report from the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Cumulative bytes downloaded so far.
    pub downloaded: u64,
    /// Exact total size, when known.
    pub total: Option<u64>,
    /// Estimated total size, when the exact one is not known.
    pub total_estimate: Option<u64>,
}

impl ProgressUpdate {
    /// Best available total: exact if non-zero, else the estimate, else 0.
    pub fn effective_total(&self) -> u64 {
        self.total
            .filter(|t| *t > 0)
            .or(self.total_estimate)
            .unwrap_or(0)
    }
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub downloaded: u64,
    pub total: u64,
}

/// Lock-free progress counters for one download.
#[derive(Debug, Default)]
pub struct DownloadProgress {
    downloaded: AtomicU64,
    total: AtomicU64,
}

impl DownloadProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest cumulative counts.
    pub fn record(&self, update: ProgressUpdate) {
        self.downloaded.store(update.downloaded, Ordering::Relaxed);
        self.total.store(update.effective_total(), Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            downloaded: self.downloaded.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
        }
    }

    /// A callback that records into these counters.
    pub fn callback(self: &Arc<Self>) -> ProgressCallback {
        let progress = Arc::clone(self);
        Arc::new(move |update| progress.record(update))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_total_wins_over_estimate() {
        let update = ProgressUpdate {
            downloaded: 10,
            total: Some(100),
            total_estimate: Some(90),
        };
        assert_eq!(update.effective_total(), 100);
    }

    #[test]
    fn zero_total_falls_back_to_estimate() {
        let update = ProgressUpdate {
            downloaded: 10,
            total: Some(0),
            total_estimate: Some(90),
        };
        assert_eq!(update.effective_total(), 90);
    }

    #[test]
    fn missing_totals_report_zero() {
        assert_eq!(ProgressUpdate::default().effective_total(), 0);
    }

    #[test]
    fn callback_records_into_counters() {
        let progress = Arc::new(DownloadProgress::new());
        let callback = progress.callback();

        callback(ProgressUpdate {
            downloaded: 512,
            total: None,
            total_estimate: Some(2048),
        });
        callback(ProgressUpdate {
            downloaded: 1024,
            total: Some(4096),
            total_estimate: None,
        });

        assert_eq!(
            progress.snapshot(),
            ProgressSnapshot {
                downloaded: 1024,
                total: 4096
            }
        );
    }
}
