//! Public and internal types for the recifetch API and pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

use crate::utils::config::{CollectLimits, PackagePaths};

/// Metadata for one video as returned by the platform. Never mutated by the pipeline.
///
/// Field names double as the keys of the output JSON document. Any other metadata the
/// extractor reported (chapters, thumbnail, upload date, page URL, ...) rides along in `extra`
/// and is written back out at the same level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Platform identifier (unique per platform).
    pub id: String,
    pub title: String,
    pub description: String,
    /// Length in seconds, when the platform reports it.
    pub duration: Option<u64>,
    pub view_count: Option<u64>,
    /// Platform category labels, as given (case preserved).
    pub categories: Vec<String>,
    /// Channel display name.
    pub channel: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Ordered records that passed dedup and validation. Built once per run.
pub type AcceptedBatch = Vec<CandidateRecord>;

/// Counters for one run, logged at the end and returned to the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub queries: usize,
    /// Records returned by the fetcher across all queries.
    pub fetched: usize,
    /// Records skipped because their id was seeded or already collected this run.
    pub duplicates: usize,
    pub collected: usize,
    pub accepted: usize,
    /// Rejections per rule, in rule order: duration, views, blacklist, category, locale.
    pub rejected: [usize; 5],
}

impl RunSummary {
    pub fn total_rejected(&self) -> usize {
        self.rejected.iter().sum()
    }
}

/// Full options (CLI and config file).
#[derive(Clone, Debug)]
pub struct Opts {
    /// History / vocabulary database.
    pub db_path: PathBuf,
    /// Destination of the accepted batch.
    pub output_path: PathBuf,
    /// Per-query result cap. Always positive.
    pub max_results: usize,
    /// Worker threads for the collection phase. 1 = sequential.
    pub fetch_threads: usize,
    /// Extractor executable.
    pub yt_dlp: PathBuf,
    /// Show progress bar and debug logs.
    pub verbose: bool,
    /// Open the database with SQLCipher.
    pub encrypt: bool,
    /// Run every phase but skip the write.
    pub dry_run: bool,
}

impl Default for Opts {
    fn default() -> Self {
        let paths = PackagePaths::get();
        Self {
            db_path: PathBuf::from(paths.db_filename()),
            output_path: PathBuf::from(paths.output_filename()),
            max_results: CollectLimits::DEFAULT_MAX_RESULTS,
            fetch_threads: 1,
            yt_dlp: PathBuf::from(CollectLimits::YT_DLP_BIN),
            verbose: false,
            encrypt: false,
            dry_run: false,
        }
    }
}
