use clap::Parser;
use std::path::PathBuf;

/// Discover cooking videos, skip ones already ingested, filter, and write a JSON batch.
#[derive(Clone, Parser)]
#[command(name = "recifetch")]
#[command(about = "Search cooking videos and write the new, valid ones to a JSON batch.")]
pub struct Cli {
    /// Recipe database holding ingested video ids and dish types. Default: recifetch.db (or RECIFETCH_DB).
    #[arg(long, short)]
    pub db: Option<PathBuf>,

    /// Output file for the accepted batch. Default: filtered_videos.json.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Maximum results fetched per search query.
    #[arg(long, short = 'n', value_parser = clap::value_parser!(u64).range(1..))]
    pub max_results: Option<u64>,

    /// Number of queries searched concurrently.
    #[arg(long, short = 't', value_parser = clap::value_parser!(u64).range(1..))]
    pub threads: Option<u64>,

    /// Path to the yt-dlp executable.
    #[arg(long = "yt-dlp", value_name = "PATH")]
    pub yt_dlp: Option<PathBuf>,

    /// Run every phase but do not write the output file.
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output (debug logs and progress bar).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,

    /// Database is encrypted with SQLCipher. Key from RECIFETCH_DB_KEY, .env, or prompt.
    #[arg(long, short = 'x', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub encrypt: Option<bool>,
}
