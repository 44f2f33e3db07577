//! Application configuration constants.
//! Defaults and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived file names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    db_filename: String,
    config_filename: String,
    env_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                db_filename: format!("{pkg}.db"),
                config_filename: format!(".{pkg}.toml"),
                env_prefix: pkg.to_uppercase(),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    pub fn db_filename(&self) -> &str {
        &self.db_filename
    }

    pub fn output_filename(&self) -> &str {
        OUTPUT_FILENAME
    }

    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable name for `suffix`, e.g. `RECIFETCH_DB`.
    pub fn env_var(&self, suffix: &str) -> String {
        format!("{}_{suffix}", self.env_prefix)
    }
}

/// Default name of the accepted-batch document.
pub const OUTPUT_FILENAME: &str = "filtered_videos.json";

// ---- Collection ----

/// Fetch caps and worker limits for the collection phase.
pub struct CollectLimits;

impl CollectLimits {
    /// Per-query result cap when nothing else is configured.
    pub const DEFAULT_MAX_RESULTS: usize = 20;
    /// Upper bound on collection workers; the platform throttles aggressive clients.
    pub const MAX_FETCH_THREADS: usize = 8;
    /// Extractor executable looked up on PATH.
    pub const YT_DLP_BIN: &'static str = "yt-dlp";
    /// Chars of extractor stderr kept in error messages.
    pub const STDERR_TAIL: usize = 512;
}

/// Bulky extractor fields not carried into the batch: stream formats, caption tracks,
/// request headers and the replay heatmap.
pub const DROPPED_EXTRACTOR_KEYS: [&str; 6] = [
    "formats",
    "requested_formats",
    "subtitles",
    "automatic_captions",
    "http_headers",
    "heatmap",
];

// ---- Query generation ----

/// Vocabulary used when the dish-type table is unavailable or empty.
pub const FALLBACK_VOCABULARY: [&str; 3] = ["한식", "중식", "양식"];

/// Suffixes appended to every vocabulary term ("recipe", "how to make").
pub const QUERY_SUFFIXES: [&str; 2] = ["레시피", "만들기"];

/// Queries always issued regardless of vocabulary.
pub const STANDALONE_QUERIES: [&str; 2] = ["간단한 요리", "자취생 요리"];

// ---- Validation defaults ----

/// Default thresholds for [`ValidationRules`](crate::pipeline::validator::ValidationRules).
pub struct FilterDefaults;

impl FilterDefaults {
    pub const MIN_DURATION_SECS: u64 = 60;
    pub const MIN_VIEW_COUNT: u64 = 5_000;
    /// Promotional markers ("advertisement", "sponsored").
    pub const BLACKLIST: [&'static str; 2] = ["광고", "협찬"];
    /// Category names, lowercase.
    pub const CATEGORIES: [&'static str; 3] = ["cooking", "how-to & style", "food & drink"];
    /// Hangul syllables block.
    pub const SCRIPT_RANGE: (char, char) = ('\u{AC00}', '\u{D7A3}');
}
