//! Progress reporting for batch runs
//!
//! Sources may be unbounded, so the total number of batches is not known up
//! front. [`ProgressSink`] therefore only receives discrete "one more batch
//! done" events rather than an upfront total.

use indicatif::{ProgressBar, ProgressStyle};

/// Receiver of batch-level progress events.
///
/// [`advance`](ProgressSink::advance) is called once per processed batch
/// (whether it succeeded or exhausted its retries) and
/// [`finish`](ProgressSink::finish) once when the source is drained.
pub trait ProgressSink {
    /// One more batch has been processed.
    fn advance(&self);

    /// The run is complete.
    fn finish(&self);
}

/// Terminal progress indicator backed by indicatif.
///
/// Uses a spinner with an elapsed-time and position readout instead of a
/// percentage bar, since the batch total may be indeterminate.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    /// Create a spinner ticking once per processed batch.
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} batches {msg}")
                .expect("static progress template is valid"),
        );
        bar.set_message("processed");
        Self { bar }
    }
}

impl Default for BatchProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for BatchProgress {
    fn advance(&self) {
        self.bar.inc(1);
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}

/// No-op sink used when progress reporting is disabled.
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn advance(&self) {}

    fn finish(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_progress_counts_advances() {
        let progress = BatchProgress::new();
        progress.advance();
        progress.advance();
        progress.advance();
        assert_eq!(progress.bar.position(), 3);
        progress.finish();
        assert!(progress.bar.is_finished());
    }

    #[test]
    fn test_null_progress_is_silent() {
        let progress = NullProgress;
        progress.advance();
        progress.finish();
    }
}
