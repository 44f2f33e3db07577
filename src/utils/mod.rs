pub mod config;
pub mod logger;
pub mod passphrase;
pub(crate) mod recifetch_toml;
pub mod tempfiles;

pub use config::*;
pub use logger::setup_logging;
pub use passphrase::get_passphrase;
pub use tempfiles::{remove_stale_temp, rename_temp_to_final, temp_path_for};
