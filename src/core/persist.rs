//! Per-batch result persistence
//!
//! Successful batch results are written out incrementally, one artifact per
//! batch, immediately after the batch completes. The destination and format
//! are behind the [`ResultSink`] trait so callers can substitute their own
//! storage.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::utils::error::Result;

/// Destination for successful batch results.
pub trait ResultSink<R> {
    /// Durably record the result of the batch with the given 1-based index.
    fn persist(&self, batch_index: usize, result: &R) -> Result<()>;
}

/// Sink writing one pretty-printed JSON file per batch.
///
/// The per-batch path is derived from a base path by appending `_batch{N}` to
/// the file stem, keeping the extension: a base of `out.json` produces
/// `out_batch1.json`, `out_batch2.json`, and so on. Output is deterministic,
/// so re-running the same inputs rewrites byte-identical artifacts.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    base_path: PathBuf,
}

impl JsonFileSink {
    /// Create a sink rooted at the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Destination file for the given 1-based batch index.
    pub fn batch_path(&self, batch_index: usize) -> PathBuf {
        let mut name = self
            .base_path
            .file_stem()
            .map(OsString::from)
            .unwrap_or_default();
        name.push(format!("_batch{batch_index}"));
        if let Some(ext) = self.base_path.extension() {
            name.push(".");
            name.push(ext);
        }
        self.base_path.with_file_name(name)
    }

    /// Base path this sink derives per-batch destinations from.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl<R: Serialize> ResultSink<R> for JsonFileSink {
    fn persist(&self, batch_index: usize, result: &R) -> Result<()> {
        let path = self.batch_path(batch_index);
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, result)?;
        writer.flush()?;
        debug!("Batch {} result saved to {}", batch_index, path.display());
        Ok(())
    }
}
