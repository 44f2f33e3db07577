//! Load `.recifetch.toml` from a directory (CLI only). Lib callers build `Opts` and
//! `ValidationRules` themselves.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::Opts;
use crate::pipeline::validator::ValidationRules;
use crate::utils::config::PackagePaths;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecifetchToml {
    #[serde(default)]
    settings: SettingsSection,
    #[serde(default)]
    filters: FiltersSection,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsSection {
    db_path: Option<String>,
    output: Option<String>,
    max_results: Option<usize>,
    threads: Option<usize>,
    yt_dlp: Option<String>,
    verbose: Option<bool>,
    encrypt: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct FiltersSection {
    min_duration_secs: Option<u64>,
    min_view_count: Option<u64>,
    blacklist: Option<Vec<String>>,
    categories: Option<Vec<String>>,
}

/// Load the config file from `dir` if present. `Ok(None)` when there is no file; unreadable or
/// malformed files are errors so the caller can report them once logging is up.
pub(crate) fn load_recifetch_toml(dir: &Path) -> Result<Option<RecifetchToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_recifetch_toml(&s)
        .map(Some)
        .with_context(|| format!("parse {}", path.display()))
}

pub(crate) fn parse_recifetch_toml(s: &str) -> Result<RecifetchToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $target:expr, $sec_field:ident => $target_field:ident) => {
        if let Some(v) = $sec.$sec_field.clone() {
            $target.$target_field = v;
        }
    };
}

/// Apply `[settings]` to opts (only fields present in the file). Call before applying CLI.
pub(crate) fn apply_file_to_opts(file: &RecifetchToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref p) = s.db_path {
        opts.db_path = PathBuf::from(p);
    }
    if let Some(ref p) = s.output {
        opts.output_path = PathBuf::from(p);
    }
    if let Some(ref p) = s.yt_dlp {
        opts.yt_dlp = PathBuf::from(p);
    }
    apply_file_opt!(s, opts, max_results => max_results);
    apply_file_opt!(s, opts, threads => fetch_threads);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, encrypt => encrypt);
}

/// Apply `[filters]` to the validation rules.
pub(crate) fn apply_file_to_rules(file: &RecifetchToml, rules: &mut ValidationRules) {
    let f = &file.filters;
    apply_file_opt!(f, rules, min_duration_secs => min_duration_secs);
    apply_file_opt!(f, rules, min_view_count => min_view_count);
    apply_file_opt!(f, rules, blacklist => blacklist);
    if let Some(ref cats) = f.categories {
        rules.categories = cats.iter().map(|c| c.to_lowercase()).collect();
    }
}
