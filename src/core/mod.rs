//! Core batch pipeline: segmentation, execution, persistence, and progress.

pub mod executor;
pub mod persist;
pub mod progress;
pub mod segment;

pub use executor::{BatchConfig, BatchExecutor, BatchSummary, Batched, run_batched};
pub use persist::{JsonFileSink, ResultSink};
pub use progress::{BatchProgress, NullProgress, ProgressSink};
pub use segment::{Batches, segment};
