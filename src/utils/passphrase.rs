//! Passphrase loading for SQLCipher: env var → .env in dir → secure prompt.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::path::Path;

use crate::utils::config::PackagePaths;

fn key_from_env(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn try_env_then_dotenv(dir: &Path) -> Option<String> {
    let var = PackagePaths::get().env_var("DB_KEY");
    if let Some(s) = key_from_env(&var) {
        return Some(s);
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        return key_from_env(&var);
    }
    None
}

/// Read the database passphrase: env (`RECIFETCH_DB_KEY`) → .env in `dir` → secure prompt.
pub fn get_passphrase(dir: &Path) -> Result<String> {
    info!("Database encryption enabled (flag given or encrypted database detected)");
    if let Some(s) = try_env_then_dotenv(dir) {
        info!("Passphrase found in environment");
        return Ok(s);
    }
    let label = format!("[{}]", env!("CARGO_PKG_NAME")).cyan().bold();
    let pass = rpassword::prompt_password(format!("{} Enter database passphrase: ", label))
        .context("read passphrase")?;
    Ok(pass.trim().to_string())
}
