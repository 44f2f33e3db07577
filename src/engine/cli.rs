//! CLI command handler: layer config, open the stores, run the pipeline once.

use anyhow::Result;
use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::engine::arg_parser::Cli;
use crate::engine::db_ops::{SqliteStore, open_db, open_db_or_detect_encrypted};
use crate::engine::fetcher::YtDlpSource;
use crate::pipeline::{BatchSink, JsonFileSink, MemorySink, Unavailable, ValidationRules};
use crate::{Opts, crawl};
use crate::utils::config::PackagePaths;
use crate::utils::get_passphrase;
use crate::utils::recifetch_toml::{
    RecifetchToml, apply_file_to_opts, apply_file_to_rules, load_recifetch_toml,
};
use crate::utils::setup_logging;

/// Defaults → `.recifetch.toml` → environment (`RECIFETCH_DB`, also via .env) → CLI flags.
fn setup_opts(cli: &Cli, dir: &Path, file: Option<&RecifetchToml>) -> (Opts, ValidationRules) {
    let mut opts = Opts::default();
    let mut rules = ValidationRules::default();
    if let Some(file) = file {
        apply_file_to_opts(file, &mut opts);
        apply_file_to_rules(file, &mut rules);
    }

    let _ = dotenvy::from_path(dir.join(".env"));
    if let Ok(db) = std::env::var(PackagePaths::get().env_var("DB"))
        && !db.trim().is_empty()
    {
        opts.db_path = PathBuf::from(db.trim());
    }

    if let Some(ref db) = cli.db {
        opts.db_path = db.clone();
    }
    if let Some(ref out) = cli.output {
        opts.output_path = out.clone();
    }
    if let Some(n) = cli.max_results {
        opts.max_results = n as usize;
    }
    if let Some(t) = cli.threads {
        opts.fetch_threads = t as usize;
    }
    if let Some(ref bin) = cli.yt_dlp {
        opts.yt_dlp = bin.clone();
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
    if let Some(x) = cli.encrypt {
        opts.encrypt = x;
    }
    opts.dry_run = cli.dry_run;
    (opts, rules)
}

/// Open the recipe database read-only. Errors (including a missing file) are returned so the
/// caller can degrade.
fn open_store(opts: &Opts, dir: &Path) -> Result<SqliteStore> {
    let conn = if opts.encrypt {
        let pass = get_passphrase(dir)?;
        open_db(&opts.db_path, Some(pass.as_str()))?
    } else {
        open_db_or_detect_encrypted(&opts.db_path, dir)?
    };
    Ok(SqliteStore::new(conn))
}

/// Run one crawl. Only a failed write of the batch makes this return an error.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let file = load_recifetch_toml(&dir);
    let (opts, rules) = setup_opts(cli, &dir, file.as_ref().ok().and_then(Option::as_ref));
    setup_logging(opts.verbose);
    if let Err(ref e) = file {
        warn!("{:#}. Ignoring config file.", e);
    }

    let source = YtDlpSource::new(&opts.yt_dlp);
    let mut json_sink = JsonFileSink::new(&opts.output_path);
    let mut memory_sink = MemorySink::default();
    let sink: &mut dyn BatchSink = if opts.dry_run {
        warn!("RUNNING IN DRY-RUN MODE. THE BATCH WILL NOT BE WRITTEN.");
        &mut memory_sink
    } else {
        &mut json_sink
    };

    let summary = match open_store(&opts, &dir) {
        Ok(store) => crawl(source, &store, &store, rules, &opts, sink)?,
        Err(e) => {
            warn!("Recipe database unavailable: {:#}", e);
            let missing = Unavailable(format!("{:#}", e));
            crawl(source, &missing, &missing, rules, &opts, sink)?
        }
    };

    if opts.dry_run {
        info!("Dry run: {} videos would be written", summary.accepted);
    } else {
        info!(
            "Saved {} filtered videos to '{}'",
            summary.accepted,
            opts.output_path.display()
        );
    }
    Ok(())
}
