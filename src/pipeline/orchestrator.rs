//! Run orchestration: seed, collect, filter and emit phases over injected collaborators.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::engine::fetcher::VideoFetcher;
use crate::engine::progress::{ProgressBar, create_query_bar, finish_bar, update_progress_bar};
use crate::pipeline::dedup::Deduplicator;
use crate::pipeline::emit::BatchSink;
use crate::pipeline::queries::QuerySource;
use crate::pipeline::sources::{HistoryStore, VocabularyStore};
use crate::pipeline::validator::Validator;
use crate::utils::config::CollectLimits;
use crate::{AcceptedBatch, CandidateRecord, Opts, RunSummary};

/// Collection-phase settings taken from [`Opts`].
#[derive(Clone, Debug)]
pub struct CollectSettings {
    /// Per-query cap passed to the fetcher. Must be positive.
    pub max_results: usize,
    /// 1 = fetch queries one after another. More = fetch on a rayon pool; batch order unspecified.
    pub fetch_threads: usize,
    pub show_progress: bool,
}

impl Default for CollectSettings {
    fn default() -> Self {
        Self {
            max_results: CollectLimits::DEFAULT_MAX_RESULTS,
            fetch_threads: 1,
            show_progress: false,
        }
    }
}

impl From<&Opts> for CollectSettings {
    fn from(o: &Opts) -> Self {
        Self {
            max_results: o.max_results.max(1),
            fetch_threads: o.fetch_threads.clamp(1, CollectLimits::MAX_FETCH_THREADS),
            show_progress: o.verbose,
        }
    }
}

/// Seed → collect → filter → emit. Owns the seen-id set for the duration of a run.
pub struct Pipeline<'a> {
    fetcher: &'a VideoFetcher,
    validator: Validator,
    settings: CollectSettings,
    dedup: Deduplicator,
    queries: QuerySource,
    summary: RunSummary,
}

impl<'a> Pipeline<'a> {
    pub fn new(fetcher: &'a VideoFetcher, validator: Validator, settings: CollectSettings) -> Self {
        Self {
            fetcher,
            validator,
            settings,
            dedup: Deduplicator::new(),
            queries: QuerySource::fallback(),
            summary: RunSummary::default(),
        }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn deduplicator(&self) -> &Deduplicator {
        &self.dedup
    }

    pub fn query_source(&self) -> &QuerySource {
        &self.queries
    }

    /// Seed phase. Never fails: unavailable stores degrade to empty history / fallback vocabulary.
    pub fn seed(&mut self, history: &dyn HistoryStore, vocabulary: &dyn VocabularyStore) {
        self.dedup.seed_from(history);
        self.queries = QuerySource::load(vocabulary);
    }

    /// Collection phase over the generated queries.
    pub fn collect(&mut self) -> Vec<CandidateRecord> {
        let queries: Vec<String> = self.queries.generate_queries().into_iter().collect();
        self.collect_queries(&queries)
    }

    /// Collection phase over explicit queries: fetch, drop ids already seen, mark the rest
    /// seen immediately and keep them whether or not they will pass validation.
    pub fn collect_queries(&mut self, queries: &[String]) -> Vec<CandidateRecord> {
        self.summary.queries += queries.len();
        let bar = self
            .settings
            .show_progress
            .then(|| create_query_bar(queries.len()));

        let results = if self.settings.fetch_threads > 1 && queries.len() > 1 {
            self.fetch_parallel(queries, bar.as_ref())
        } else {
            self.fetch_sequential(queries, bar.as_ref())
        };
        if let Some(ref bar) = bar {
            finish_bar(bar);
        }

        let mut collected = Vec::new();
        for records in results {
            self.summary.fetched += records.len();
            for record in records {
                if self.dedup.check_and_mark(&record.id) {
                    collected.push(record);
                } else {
                    debug!("duplicate {}", record.id);
                    self.summary.duplicates += 1;
                }
            }
        }
        self.summary.collected += collected.len();
        info!(
            "Collected {} new videos from {} queries",
            collected.len(),
            queries.len()
        );
        collected
    }

    fn fetch_sequential(
        &self,
        queries: &[String],
        bar: Option<&ProgressBar>,
    ) -> Vec<Vec<CandidateRecord>> {
        queries
            .iter()
            .map(|q| {
                info!("Searching '{}'...", q);
                let records = self.fetcher.fetch(q, self.settings.max_results);
                if let Some(bar) = bar {
                    update_progress_bar(bar, 1);
                }
                records
            })
            .collect()
    }

    /// Fetches run on a dedicated pool; dedup happens afterwards on this thread, so the
    /// check-then-mark pair is never raced.
    fn fetch_parallel(
        &self,
        queries: &[String],
        bar: Option<&ProgressBar>,
    ) -> Vec<Vec<CandidateRecord>> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.settings.fetch_threads)
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!("Could not start fetch pool ({}); searching sequentially", e);
                return self.fetch_sequential(queries, bar);
            }
        };
        debug!("Searching with {} threads", self.settings.fetch_threads);
        let max_results = self.settings.max_results;
        let fetcher = self.fetcher;
        pool.install(|| {
            queries
                .par_iter()
                .map(|q| {
                    info!("Searching '{}'...", q);
                    let records = fetcher.fetch(q, max_results);
                    if let Some(bar) = bar {
                        update_progress_bar(bar, 1);
                    }
                    records
                })
                .collect()
        })
    }

    /// Filter phase: keep only records that pass every rule, in collection order.
    pub fn filter(&mut self, collected: Vec<CandidateRecord>) -> AcceptedBatch {
        let mut accepted = AcceptedBatch::with_capacity(collected.len());
        for record in collected {
            match self.validator.check(&record) {
                Ok(()) => accepted.push(record),
                Err(reason) => {
                    info!("Filtered {}: {}", record.id, reason);
                    self.summary.rejected[reason.rule_index()] += 1;
                }
            }
        }
        self.summary.accepted += accepted.len();
        accepted
    }

    /// Emit phase. Any sink error is fatal for the run.
    pub fn emit(&self, batch: &AcceptedBatch, sink: &mut dyn BatchSink) -> Result<()> {
        sink.write_batch(batch)
            .with_context(|| format!("write accepted batch ({} videos)", batch.len()))
    }

    /// All four phases in order. Only the emit phase can fail.
    pub fn run(
        &mut self,
        history: &dyn HistoryStore,
        vocabulary: &dyn VocabularyStore,
        sink: &mut dyn BatchSink,
    ) -> Result<RunSummary> {
        self.seed(history, vocabulary);
        let collected = self.collect();
        let batch = self.filter(collected);
        self.emit(&batch, sink)?;
        let s = &self.summary;
        info!(
            "Run done: {} queries, {} fetched, {} duplicates, {} accepted, {} rejected",
            s.queries,
            s.fetched,
            s.duplicates,
            s.accepted,
            s.total_rejected()
        );
        Ok(self.summary.clone())
    }
}
