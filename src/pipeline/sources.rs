//! Read-only collaborators consulted once during the seed phase.

use anyhow::Result;

/// Identifiers already ingested by earlier runs.
pub trait HistoryStore {
    fn list_known_ids(&self) -> Result<Vec<String>>;
}

/// Reference vocabulary (dish types) used to build search queries.
pub trait VocabularyStore {
    fn list_terms(&self) -> Result<Vec<String>>;
}

/// Stand-in for a store that could not be opened. Every read fails with the stored reason,
/// so the seed phase takes its fallback path.
#[derive(Clone, Debug)]
pub struct Unavailable(pub String);

impl HistoryStore for Unavailable {
    fn list_known_ids(&self) -> Result<Vec<String>> {
        Err(anyhow::anyhow!("history store unavailable: {}", self.0))
    }
}

impl VocabularyStore for Unavailable {
    fn list_terms(&self) -> Result<Vec<String>> {
        Err(anyhow::anyhow!("vocabulary store unavailable: {}", self.0))
    }
}
