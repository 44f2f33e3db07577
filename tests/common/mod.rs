//! Shared fakes for integration tests.
#![allow(dead_code)]

use recifetch::CandidateRecord;
use recifetch::engine::{FetchError, VideoSource};
use recifetch::pipeline::{HistoryStore, VocabularyStore};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A record that passes every default rule.
pub fn valid_record(id: &str) -> CandidateRecord {
    CandidateRecord {
        id: id.to_string(),
        title: "백종원 김치찌개 황금레시피".to_string(),
        description: "집에서 쉽게 만드는 김치찌개".to_string(),
        duration: Some(600),
        view_count: Some(120_000),
        categories: vec!["Howto & Style".to_string(), "Cooking".to_string()],
        channel: "백종원 PAIK JONG WON".to_string(),
        extra: Default::default(),
    }
}

pub struct FakeHistory(pub Vec<String>);

impl HistoryStore for FakeHistory {
    fn list_known_ids(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

pub struct FakeVocabulary(pub Vec<String>);

impl VocabularyStore for FakeVocabulary {
    fn list_terms(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Fixed responses per query; queries listed in `failing` return an error.
/// Unknown queries return nothing. Records every call.
#[derive(Default)]
pub struct FakeSource {
    pub responses: HashMap<String, Vec<CandidateRecord>>,
    pub failing: Vec<String>,
    /// Shared so a test can inspect calls after the source moves into a fetcher.
    pub calls: Arc<Mutex<Vec<(String, usize)>>>,
}

impl FakeSource {
    pub fn with(mut self, query: &str, records: Vec<CandidateRecord>) -> Self {
        self.responses.insert(query.to_string(), records);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.push(query.to_string());
        self
    }
}

impl VideoSource for FakeSource {
    fn search(&self, query: &str, max_results: usize) -> Result<Vec<CandidateRecord>, FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));
        if self.failing.iter().any(|q| q == query) {
            return Err(FetchError::Other(format!("simulated outage for {query}")));
        }
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }
}

/// Unique scratch directory under the system temp dir.
pub fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "{}_test_{}_{}",
        env!("CARGO_PKG_NAME"),
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
