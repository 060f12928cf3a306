//! # batchflow
//!
//! Sequential batch execution for lazy input sequences: fixed-size
//! segmentation, a per-batch retry policy with a fixed delay, ordered result
//! accumulation, optional per-batch JSON persistence, and optional progress
//! reporting.
//!
//! ## Features
//!
//! - **Lazy segmentation**: items are pulled one at a time, so unbounded
//!   sources work and memory stays bounded by one batch.
//! - **Fixed-delay retries**: each batch independently gets `max_retries`
//!   extra attempts; a batch that exhausts them is reported and skipped
//!   without aborting the run.
//! - **Incremental persistence**: each successful result is written as a
//!   pretty-printed JSON artifact named by batch index, immediately after
//!   the batch completes.
//! - **Order preserved**: results appear in batch order, with no placeholders
//!   for failed batches.
//!
//! ## Quick start
//!
//! ```
//! use batchflow::{BatchConfig, BatchExecutor};
//! use std::convert::Infallible;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> batchflow::Result<()> {
//!     let config = BatchConfig::new(5)
//!         .with_max_retries(2)
//!         .with_retry_delay(Duration::from_millis(100));
//!
//!     let executor = BatchExecutor::new(config);
//!     let results = executor
//!         .run(1..=22u32, |batch| async move {
//!             Ok::<_, Infallible>(batch.iter().map(|n| n + 1).collect::<Vec<_>>())
//!         })
//!         .await?;
//!
//!     assert_eq!(results.len(), 5);
//!     assert_eq!(results[4], vec![22, 23]);
//!     Ok(())
//! }
//! ```
//!
//! ## Wrapped invocation
//!
//! The same loop is reachable by binding a processing function once and
//! calling it on sequences:
//!
//! ```
//! use batchflow::{BatchConfig, BatchExecutor};
//! use std::convert::Infallible;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> batchflow::Result<()> {
//!     let mut summed = BatchExecutor::new(BatchConfig::new(3))
//!         .bind(|batch: Vec<u32>| async move { Ok::<_, Infallible>(batch.iter().sum::<u32>()) });
//!
//!     let totals = summed.call(1..=9u32).await?;
//!     assert_eq!(totals, vec![6, 15, 24]);
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod core;
pub mod utils;

// Re-export main types
pub use core::executor::{BatchConfig, BatchExecutor, BatchSummary, Batched, run_batched};
pub use core::persist::{JsonFileSink, ResultSink};
pub use core::progress::{BatchProgress, NullProgress, ProgressSink};
pub use core::segment::{Batches, segment};
pub use utils::error::{BatchError, Result};
pub use utils::logging::init_logging;
