//! Output boundary: one atomic write of the accepted batch.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::CandidateRecord;
use crate::utils::{remove_stale_temp, rename_temp_to_final, temp_path_for};

/// Receives the final batch exactly once per run. Errors are fatal to the run.
pub trait BatchSink {
    fn write_batch(&mut self, batch: &[CandidateRecord]) -> Result<()>;
}

/// Pretty-printed JSON array at `path`. Written to a sibling temp file and renamed, so
/// `path` is either the complete new batch or left as it was.
#[derive(Clone, Debug)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn write_json(temp_path: &Path, batch: &[CandidateRecord]) -> Result<()> {
    let file = File::create(temp_path)
        .with_context(|| format!("create temp output {}", temp_path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, batch).context("serialize accepted batch")?;
    writer.write_all(b"\n")?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .context("flush temp output")?;
    file.sync_all().context("sync temp output")?;
    Ok(())
}

impl BatchSink for JsonFileSink {
    fn write_batch(&mut self, batch: &[CandidateRecord]) -> Result<()> {
        let temp_path = temp_path_for(&self.path);
        remove_stale_temp(&temp_path)?;
        if let Err(e) = write_json(&temp_path, batch) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(e);
        }
        rename_temp_to_final(&temp_path, &self.path).inspect_err(|_| {
            let _ = std::fs::remove_file(&temp_path);
        })
    }
}

/// Keeps the batch in memory. Used by dry runs and by callers that post-process the batch.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub batches: Vec<Vec<CandidateRecord>>,
}

impl BatchSink for MemorySink {
    fn write_batch(&mut self, batch: &[CandidateRecord]) -> Result<()> {
        self.batches.push(batch.to_vec());
        Ok(())
    }
}
