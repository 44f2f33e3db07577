//! Engine: CLI wiring, database access, extraction and progress display.

pub mod arg_parser;
pub mod cli;
pub mod db_ops;
pub mod fetcher;
pub mod progress;

// Re-export commonly used items
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use db_ops::{SqliteStore, open_db, open_db_in_memory, open_db_or_detect_encrypted};
pub use fetcher::{FetchError, VideoFetcher, VideoSource, YtDlpSource, parse_search_output};
