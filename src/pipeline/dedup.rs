//! Seen-identifier tracking across runs (seeded) and within a run (marked).

use log::{info, warn};
use std::collections::HashSet;

use crate::pipeline::sources::HistoryStore;

#[derive(Clone, Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add previously ingested ids. Idempotent.
    pub fn seed<I, S>(&mut self, existing_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.seen.extend(existing_ids.into_iter().map(Into::into));
    }

    /// Seed from the history store. A failing store leaves the set empty and logs a warning;
    /// the run then accepts the risk of reprocessing old videos.
    pub fn seed_from(&mut self, store: &dyn HistoryStore) {
        match store.list_known_ids() {
            Ok(ids) => {
                self.seed(ids);
                info!("Known video ids in history: {}", self.seen.len());
            }
            Err(e) => warn!(
                "Could not load known video ids: {:#}. Continuing without history.",
                e
            ),
        }
    }

    pub fn is_new(&self, id: &str) -> bool {
        !self.seen.contains(id)
    }

    /// Idempotent.
    pub fn mark_seen(&mut self, id: &str) {
        if !self.seen.contains(id) {
            self.seen.insert(id.to_string());
        }
    }

    /// `is_new` followed by `mark_seen` as one step. True when `id` was new.
    pub fn check_and_mark(&mut self, id: &str) -> bool {
        if self.is_new(id) {
            self.seen.insert(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
