//! Progress bar over search queries (verbose mode only).

use kdam::{Animation, Bar, BarExt};
use std::sync::{Arc, Mutex};

pub type ProgressBar = Arc<Mutex<Bar>>;

/// Bar with a known total of queries.
pub fn create_query_bar(total: usize) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = total,
        desc = "Searching",
        animation = Animation::Classic,
        unit = " queries"
    )))
}

/// Advance by `n`. Uses try_lock so parallel fetch workers never wait on the bar;
/// a skipped update is caught up by the next one.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut bar) = pb.try_lock() {
        let _ = bar.update(n);
    }
}

/// Final refresh so the bar ends at its total, then newline.
pub fn finish_bar(pb: &ProgressBar) {
    if let Ok(mut bar) = pb.lock() {
        let total = bar.total;
        let _ = bar.update_to(total);
        eprintln!();
    }
}
