//! Video metadata extraction. `VideoSource` is the fallible capability; `VideoFetcher`
//! wraps any source with the fail-soft contract the pipeline relies on.

use log::{debug, error};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

use crate::CandidateRecord;
use crate::utils::config::{CollectLimits, DROPPED_EXTRACTOR_KEYS};

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("failed to run extractor {}: {source}", .bin.display())]
    Spawn {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("extractor exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },
    #[error("malformed extractor output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Something that can search the platform. Implementations may fail; the pipeline never
/// calls this directly, only through [`VideoFetcher`].
pub trait VideoSource: Send + Sync {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<CandidateRecord>, FetchError>;
}

/// Fail-soft front for a [`VideoSource`]: errors are logged and become an empty result.
pub struct VideoFetcher {
    source: Box<dyn VideoSource>,
}

impl VideoFetcher {
    pub fn new<S: VideoSource + 'static>(source: S) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// At most `max_results` records for `query`. Never fails.
    pub fn fetch(&self, query: &str, max_results: usize) -> Vec<CandidateRecord> {
        match self.source.search(query, max_results) {
            Ok(mut records) => {
                records.truncate(max_results);
                debug!("'{}': {} candidates", query, records.len());
                records
            }
            Err(e) => {
                error!("Fetching '{}' failed: {}", query, e);
                Vec::new()
            }
        }
    }
}

/// Shape of one `yt-dlp --dump-json` line. Everything optional; the platform omits fields freely.
#[derive(Debug, Deserialize)]
struct YtDlpEntry {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    duration: Option<f64>,
    view_count: Option<u64>,
    categories: Option<Vec<String>>,
    channel: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl YtDlpEntry {
    /// None when the entry has no id (cannot be deduplicated).
    fn into_record(self) -> Option<CandidateRecord> {
        let id = self.id.filter(|id| !id.is_empty())?;
        let mut extra = self.extra;
        extra.retain(|k, _| !DROPPED_EXTRACTOR_KEYS.contains(&k.as_str()));
        let channel = self.channel.or_else(|| {
            extra
                .get("uploader")
                .and_then(Value::as_str)
                .map(str::to_string)
        });
        Some(CandidateRecord {
            id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            duration: self.duration.filter(|d| *d >= 0.0).map(|d| d as u64),
            view_count: self.view_count,
            categories: self.categories.unwrap_or_default(),
            channel: channel.unwrap_or_default(),
            extra,
        })
    }
}

/// Parse extractor stdout (one JSON object per line) into at most `max_results` records.
/// Blank lines are skipped, id-less entries dropped, any malformed line fails the whole query.
pub fn parse_search_output(
    stdout: &str,
    max_results: usize,
) -> Result<Vec<CandidateRecord>, FetchError> {
    let mut records = Vec::new();
    for line in stdout.lines().filter(|l| !l.trim().is_empty()) {
        let entry: YtDlpEntry = serde_json::from_str(line)?;
        match entry.into_record() {
            Some(r) => records.push(r),
            None => debug!("skipping entry without id"),
        }
        if records.len() >= max_results {
            break;
        }
    }
    Ok(records)
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let last = text
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("")
        .trim();
    last.chars().take(CollectLimits::STDERR_TAIL).collect()
}

/// Runs the `yt-dlp` executable per query. Metadata only; nothing is downloaded.
#[derive(Clone, Debug)]
pub struct YtDlpSource {
    bin: PathBuf,
}

impl YtDlpSource {
    pub fn new(bin: &Path) -> Self {
        Self {
            bin: bin.to_path_buf(),
        }
    }

    fn search_args(query: &str, max_results: usize) -> Vec<String> {
        vec![
            "--dump-json".to_string(),
            "--skip-download".to_string(),
            "--no-warnings".to_string(),
            "--ignore-no-formats-error".to_string(),
            "--playlist-end".to_string(),
            max_results.to_string(),
            format!("ytsearch{max_results}:{query}"),
        ]
    }
}

impl Default for YtDlpSource {
    fn default() -> Self {
        Self::new(Path::new(CollectLimits::YT_DLP_BIN))
    }
}

impl VideoSource for YtDlpSource {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<CandidateRecord>, FetchError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }
        let output = Command::new(&self.bin)
            .args(Self::search_args(query, max_results))
            .output()
            .map_err(|source| FetchError::Spawn {
                bin: self.bin.clone(),
                source,
            })?;
        if !output.status.success() {
            return Err(FetchError::Exit {
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr),
            });
        }
        let stdout = String::from_utf8(output.stdout)
            .map_err(|e| FetchError::Other(format!("extractor output is not UTF-8: {e}")))?;
        parse_search_output(&stdout, max_results)
    }
}
