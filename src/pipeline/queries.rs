//! Search query generation from the dish-type vocabulary.

use log::{debug, warn};
use std::collections::HashSet;

use crate::pipeline::sources::VocabularyStore;
use crate::utils::config::{FALLBACK_VOCABULARY, QUERY_SUFFIXES, STANDALONE_QUERIES};

/// Vocabulary loaded at seed time. Produces the query set for one run.
#[derive(Clone, Debug)]
pub struct QuerySource {
    vocabulary: Vec<String>,
}

impl QuerySource {
    /// Use `terms` as the vocabulary. Blank terms are dropped; if nothing is left the
    /// fallback vocabulary is used instead.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if vocabulary.is_empty() {
            Self::fallback()
        } else {
            Self { vocabulary }
        }
    }

    pub fn fallback() -> Self {
        Self {
            vocabulary: FALLBACK_VOCABULARY.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Read the vocabulary from `store`. Errors and empty results degrade to the fallback.
    pub fn load(store: &dyn VocabularyStore) -> Self {
        match store.list_terms() {
            Ok(terms) if terms.iter().all(|t| t.trim().is_empty()) => {
                warn!("Vocabulary store returned no terms. Using default search terms.");
                Self::fallback()
            }
            Ok(terms) => {
                debug!("Loaded {} vocabulary terms", terms.len());
                Self::new(&terms)
            }
            Err(e) => {
                warn!("Could not load vocabulary: {:#}. Using default search terms.", e);
                Self::fallback()
            }
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Two suffixed queries per term plus the standalone queries. Iteration order is unspecified.
    pub fn generate_queries(&self) -> HashSet<String> {
        let mut queries: HashSet<String> = self
            .vocabulary
            .iter()
            .flat_map(|term| QUERY_SUFFIXES.iter().map(move |s| format!("{term} {s}")))
            .collect();
        queries.extend(STANDALONE_QUERIES.iter().map(|q| q.to_string()));
        queries
    }
}
