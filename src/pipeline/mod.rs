//! Pipeline components: stores, query generation, dedup, validation, orchestration, output.

pub mod dedup;
pub mod emit;
pub mod orchestrator;
pub mod queries;
pub mod sources;
pub mod validator;

pub use dedup::Deduplicator;
pub use emit::{BatchSink, JsonFileSink, MemorySink};
pub use orchestrator::{CollectSettings, Pipeline};
pub use queries::QuerySource;
pub use sources::{HistoryStore, Unavailable, VocabularyStore};
pub use validator::{Rejection, ValidationRules, Validator};
