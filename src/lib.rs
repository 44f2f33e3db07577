//! Recifetch: discover cooking videos, deduplicate against ingested history, filter, and batch.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;

use crate::engine::fetcher::{VideoFetcher, VideoSource};
use crate::pipeline::{
    BatchSink, CollectSettings, HistoryStore, Pipeline, ValidationRules, Validator,
    VocabularyStore,
};

/// Result alias used by public recifetch API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: run one crawl with the given collaborators and hand the accepted batch to `sink`.
///
/// - `source` is wrapped in a fail-soft [`VideoFetcher`]; a failing query contributes nothing.
/// - `history` / `vocabulary` are read once; failures fall back to empty history / default terms.
/// - Only a `sink` error is returned.
///
/// ```ignore
/// let conn = recifetch::engine::open_db(path, None)?;
/// let store = recifetch::engine::SqliteStore::new(conn);
/// let mut sink = recifetch::pipeline::JsonFileSink::new(out);
/// let summary = recifetch::crawl(
///     recifetch::engine::YtDlpSource::default(),
///     &store,
///     &store,
///     Default::default(),
///     &recifetch::Opts::default(),
///     &mut sink,
/// )?;
/// ```
pub fn crawl<S>(
    source: S,
    history: &dyn HistoryStore,
    vocabulary: &dyn VocabularyStore,
    rules: ValidationRules,
    opts: &Opts,
    sink: &mut dyn BatchSink,
) -> Result<RunSummary>
where
    S: VideoSource + 'static,
{
    debug!(
        "{} CONFIG:{:#?} RULES:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts,
        rules
    );
    let fetcher = VideoFetcher::new(source);
    let mut pipeline = Pipeline::new(&fetcher, Validator::new(rules), CollectSettings::from(opts));
    pipeline.run(history, vocabulary, sink)
}
