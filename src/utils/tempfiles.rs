use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::config::PackagePaths;

/// Sibling temp path used while writing `final_path` (same directory, so rename stays atomic).
pub fn temp_path_for(final_path: &Path) -> PathBuf {
    let name = final_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_else(|| PackagePaths::get().output_filename());
    final_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .join(format!(".{name}.tmp"))
}

/// Remove a leftover temp file from an earlier aborted run. Missing file is fine.
pub fn remove_stale_temp(temp_path: &Path) -> Result<()> {
    match fs::remove_file(temp_path) {
        Ok(()) => {
            log::debug!("removed stale temp file {}", temp_path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e)
            .with_context(|| format!("remove stale temp file at {}", temp_path.display())),
    }
}

pub fn rename_temp_to_final(temp_path: &Path, final_path: &Path) -> Result<()> {
    fs::rename(temp_path, final_path).with_context(|| {
        format!(
            "atomic rename temp output to final path ({} -> {})",
            temp_path.display(),
            final_path.display()
        )
    })
}
