//! Recifetch CLI: one crawl per invocation; use --dry-run to skip writing the batch.

use anyhow::Result;
use clap::Parser;
use recifetch::engine::arg_parser::Cli;
use recifetch::engine::handle_run;
use std::time::Instant;

fn main() -> Result<()> {
    let start_time = Instant::now();
    let cli = Cli::parse();
    handle_run(&cli)?;
    log::debug!("Total time: {:?}", start_time.elapsed());
    Ok(())
}
