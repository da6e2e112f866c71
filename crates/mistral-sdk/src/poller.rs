//! Batch job polling.
//!
//! [`BatchPoller`] re-fetches a job until its counters show every
//! sub-request resolved, sleeping a fixed interval between fetches. A
//! [`CancelSignal`] interrupts both the fetch and the sleep.

use crate::error::Result;
use crate::types::BatchJob;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

/// Default pause between two status fetches.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Cooperative cancellation shared between a caller and a poller.
///
/// Clones observe the same signal. The first reason given wins.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    reason: Arc<watch::Sender<Option<String>>>,
}

impl CancelSignal {
    /// Create a signal that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            reason: Arc::new(tx),
        }
    }

    /// Cancel with a reason. Later calls keep the first reason.
    pub fn cancel(&self, reason: impl Into<String>) {
        let reason = reason.into();
        self.reason.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
    }

    /// Whether the signal was cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.reason.borrow().is_some()
    }

    /// Cancellation reason, if cancelled.
    #[must_use]
    pub fn reason(&self) -> Option<String> {
        self.reason.borrow().clone()
    }

    /// Resolve once the signal is cancelled.
    pub async fn cancelled(&self) {
        let mut rx = self.reason.subscribe();
        // The sender lives in `self`, so the channel cannot close while waiting.
        let _ = rx.wait_for(Option::is_some).await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Polling configuration.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Pause between status fetches. Zero falls back to the default.
    pub interval: Duration,
    /// Optional cancellation.
    pub cancel: Option<CancelSignal>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            cancel: None,
        }
    }
}

impl PollConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the cancellation signal.
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn effective_interval(&self) -> Duration {
        if self.interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            self.interval
        }
    }
}

/// Source of batch job snapshots.
#[async_trait]
pub trait JobStatusFetcher: Send + Sync {
    /// Fetch the current snapshot of a job.
    async fn fetch(&self, job_id: &str) -> Result<BatchJob>;
}

#[async_trait]
impl<T: JobStatusFetcher + ?Sized> JobStatusFetcher for &T {
    async fn fetch(&self, job_id: &str) -> Result<BatchJob> {
        (**self).fetch(job_id).await
    }
}

#[async_trait]
impl<T: JobStatusFetcher + ?Sized> JobStatusFetcher for Arc<T> {
    async fn fetch(&self, job_id: &str) -> Result<BatchJob> {
        (**self).fetch(job_id).await
    }
}

/// How a wait ended.
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// The job completed; this is the final snapshot.
    Completed(BatchJob),
    /// The caller cancelled before completion.
    Cancelled {
        /// Reason passed to [`CancelSignal::cancel`].
        reason: String,
    },
}

impl PollOutcome {
    /// The final snapshot, if the job completed.
    pub fn into_job(self) -> Option<BatchJob> {
        match self {
            Self::Completed(job) => Some(job),
            Self::Cancelled { .. } => None,
        }
    }

    /// Whether the wait was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Polls a job until it completes or is cancelled.
///
/// One fetch at a time; fetch errors end the wait and are returned as is.
#[derive(Debug)]
pub struct BatchPoller<F> {
    fetcher: F,
    config: PollConfig,
}

impl<F: JobStatusFetcher> BatchPoller<F> {
    /// Create a poller.
    pub fn new(fetcher: F, config: PollConfig) -> Self {
        Self { fetcher, config }
    }

    /// Poll until completion or cancellation.
    #[instrument(skip(self), fields(interval_ms = self.config.effective_interval().as_millis() as u64))]
    pub async fn wait_for_completion(&self, job_id: &str) -> Result<PollOutcome> {
        let interval = self.config.effective_interval();
        let mut polls: u32 = 0;

        loop {
            if let Some(reason) = self.cancel_reason() {
                info!(polls, reason = %reason, "Batch wait cancelled");
                return Ok(PollOutcome::Cancelled { reason });
            }

            let job = match &self.config.cancel {
                Some(cancel) => tokio::select! {
                    biased;
                    () = cancel.cancelled() => continue,
                    job = self.fetcher.fetch(job_id) => job?,
                },
                None => self.fetcher.fetch(job_id).await?,
            };
            polls += 1;

            let summary = job.summary;
            debug!(
                polls,
                total = summary.total_requests,
                succeeded = summary.succeeded,
                failed = summary.failed,
                "Batch status"
            );

            if summary.is_complete() {
                info!(
                    polls,
                    succeeded = summary.succeeded,
                    failed = summary.failed,
                    "Batch completed"
                );
                return Ok(PollOutcome::Completed(job));
            }

            match &self.config.cancel {
                Some(cancel) => tokio::select! {
                    () = cancel.cancelled() => {}
                    () = sleep(interval) => {}
                },
                None => sleep(interval).await,
            }
        }
    }

    fn cancel_reason(&self) -> Option<String> {
        self.config.cancel.as_ref().and_then(CancelSignal::reason)
    }
}
