//! Batch executor: retry loop, result accumulation, and run configuration
//!
//! The executor drives [`segment`](crate::core::segment::segment) over the
//! input, applies the caller's async processing function to each batch under
//! a fixed-delay retry policy, and collects successful results in batch
//! order. One batch exhausting its retries does not abort the run; the
//! executor reports it and moves on to the next batch.

use std::fmt;
use std::future::Future;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::persist::{JsonFileSink, ResultSink};
use crate::core::progress::{BatchProgress, NullProgress, ProgressSink};
use crate::core::segment::segment;
use crate::utils::error::{BatchError, Result};

/// Configuration for a batch run
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of items per batch (default: 1)
    pub batch_size: usize,
    /// Show a progress indicator while the run advances (default: false)
    pub show_progress: bool,
    /// Base path for per-batch JSON artifacts; None disables persistence
    pub persist_path: Option<PathBuf>,
    /// Extra attempts after an initial failure (default: 0)
    pub max_retries: u32,
    /// Fixed wait after each failed attempt (default: 1s)
    pub retry_delay: Duration,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1,
            show_progress: false,
            persist_path: None,
            max_retries: 0,
            retry_delay: Duration::from_secs(1),
        }
    }
}

impl BatchConfig {
    /// Create a config with the given batch size.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size,
            ..Self::default()
        }
    }

    /// Enable or disable the progress indicator.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Persist each successful batch result under this base path.
    pub fn with_persist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_path = Some(path.into());
        self
    }

    /// Set extra attempts after the first failure.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the fixed wait between attempts.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    /// Check the configuration before a run starts.
    ///
    /// A zero batch size is rejected here rather than clamped: it would
    /// otherwise make segmentation degenerate.
    pub fn validate(&self) -> Result<()> {
        self.checked_batch_size().map(|_| ())
    }

    fn checked_batch_size(&self) -> Result<NonZeroUsize> {
        NonZeroUsize::new(self.batch_size)
            .ok_or_else(|| BatchError::Config("batch_size must be at least 1".to_string()))
    }
}

/// Summary of a batch run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Total batches attempted
    pub batches: usize,
    /// Batches that produced a result
    pub succeeded: usize,
    /// Batches that exhausted their retries
    pub failed: usize,
    /// Wall-clock time for the whole run
    pub total_duration: Duration,
    /// Average time per batch
    pub avg_duration: Duration,
}

/// Sequential batch executor
///
/// Created from a [`BatchConfig`]; see [`BatchExecutor::run`] for the core
/// operation. For the function-wrapping invocation style use
/// [`BatchExecutor::bind`], which yields a [`Batched`] callable routing
/// through the same loop.
pub struct BatchExecutor {
    config: BatchConfig,
}

impl BatchExecutor {
    /// Create a new executor.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Wrap a processing function so it can be called directly on sequences.
    pub fn bind<F>(self, op: F) -> Batched<F> {
        Batched { executor: self, op }
    }

    /// Segment `items`, process each batch under the retry policy, and return
    /// the results of the batches that succeeded, in batch order.
    ///
    /// `op` receives an owned batch per attempt (items are cloned so a failed
    /// attempt can be retried) and resolves to `Ok(result)` or `Err(error)`
    /// for that attempt. Failed batches contribute no entry to the output;
    /// callers needing counts can use [`run_with_summary`](Self::run_with_summary).
    ///
    /// Returns an error only for an invalid configuration or a persistence
    /// failure, never for processing failures.
    pub async fn run<T, R, E, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        op: F,
    ) -> Result<Vec<R>>
    where
        T: Clone,
        R: Serialize,
        E: fmt::Display,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let (results, _) = self.run_with_summary(items, op).await?;
        Ok(results)
    }

    /// Like [`run`](Self::run), also returning per-run statistics.
    pub async fn run_with_summary<T, R, E, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        op: F,
    ) -> Result<(Vec<R>, BatchSummary)>
    where
        T: Clone,
        R: Serialize,
        E: fmt::Display,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let sink = self
            .config
            .persist_path
            .as_ref()
            .map(|path| JsonFileSink::new(path.clone()));
        let progress: Box<dyn ProgressSink> = if self.config.show_progress {
            Box::new(BatchProgress::new())
        } else {
            Box::new(NullProgress)
        };

        self.run_with_sinks(
            items,
            op,
            sink.as_ref().map(|s| s as &dyn ResultSink<R>),
            progress.as_ref(),
        )
        .await
    }

    /// The core loop with caller-supplied sinks and no `Serialize` bound.
    ///
    /// [`run`](Self::run) and [`run_with_summary`](Self::run_with_summary)
    /// wire the sinks from the configuration and delegate here.
    pub async fn run_with_sinks<T, R, E, F, Fut>(
        &self,
        items: impl IntoIterator<Item = T>,
        mut op: F,
        persist: Option<&dyn ResultSink<R>>,
        progress: &dyn ProgressSink,
    ) -> Result<(Vec<R>, BatchSummary)>
    where
        T: Clone,
        E: fmt::Display,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let size = self.config.checked_batch_size()?;
        let start = Instant::now();

        let mut results = Vec::new();
        let mut batches = 0usize;
        let mut failed = 0usize;

        for (i, batch) in segment(items, size).enumerate() {
            let index = i + 1;
            batches += 1;

            match self.process_batch(index, batch, &mut op).await {
                Some(result) => {
                    if let Some(sink) = persist {
                        sink.persist(index, &result)
                            .map_err(|source| BatchError::Persist {
                                index,
                                source: Box::new(source),
                            })?;
                    }
                    results.push(result);
                }
                None => failed += 1,
            }
            progress.advance();
        }
        progress.finish();

        let total_duration = start.elapsed();
        let succeeded = results.len();
        let avg_duration = if batches > 0 {
            total_duration / batches as u32
        } else {
            Duration::ZERO
        };

        info!(
            "Batch run complete: {} batches ({} succeeded, {} failed)",
            batches, succeeded, failed
        );

        let summary = BatchSummary {
            batches,
            succeeded,
            failed,
            total_duration,
            avg_duration,
        };
        Ok((results, summary))
    }

    /// Run one batch through the retry loop.
    ///
    /// Returns `None` when the batch exhausted its attempts.
    async fn process_batch<T, R, E, F, Fut>(
        &self,
        index: usize,
        batch: Vec<T>,
        op: &mut F,
    ) -> Option<R>
    where
        T: Clone,
        E: fmt::Display,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        let total_attempts = self.config.max_retries.saturating_add(1);
        for attempt in 1..=total_attempts {
            debug!(
                "Processing batch {}, attempt {} ({} items)",
                index,
                attempt,
                batch.len()
            );
            match op(batch.clone()).await {
                Ok(result) => return Some(result),
                Err(e) => {
                    warn!(
                        "Batch {} attempt {} failed: {}. Retrying in {:?}",
                        index, attempt, e, self.config.retry_delay
                    );
                    tokio::time::sleep(self.config.retry_delay).await;
                }
            }
        }
        error!(
            "Batch {} failed after {} retries",
            index, self.config.max_retries
        );
        None
    }
}

/// A processing function bound to a configured executor.
///
/// Calling [`call`](Batched::call) on a sequence behaves exactly like
/// constructing the executor and invoking [`BatchExecutor::run`] with the
/// same function.
pub struct Batched<F> {
    executor: BatchExecutor,
    op: F,
}

impl<F> Batched<F> {
    /// Run the bound function over `items` through the executor.
    pub async fn call<T, R, E, Fut>(&mut self, items: impl IntoIterator<Item = T>) -> Result<Vec<R>>
    where
        T: Clone,
        R: Serialize,
        E: fmt::Display,
        F: FnMut(Vec<T>) -> Fut,
        Fut: Future<Output = std::result::Result<R, E>>,
    {
        self.executor.run(items, &mut self.op).await
    }

    /// Get current configuration
    pub fn config(&self) -> &BatchConfig {
        self.executor.config()
    }
}

/// Convenience function for a one-off batch run without building an executor.
pub async fn run_batched<T, R, E, F, Fut>(
    items: impl IntoIterator<Item = T>,
    op: F,
    config: Option<BatchConfig>,
) -> Result<Vec<R>>
where
    T: Clone,
    R: Serialize,
    E: fmt::Display,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = std::result::Result<R, E>>,
{
    let executor = BatchExecutor::new(config.unwrap_or_default());
    executor.run(items, op).await
}
