//! # certscout CLI
//!
//! Batch driver for the certificate enrichment pipeline. Reads
//! `certificates.json` from the data directory, enriches whatever is not
//! yet cached (or everything under `--force`), and writes the merged cache
//! back to `certificates.enriched.json`.

mod run;

use clap::Parser;
use run::{run, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Enrich certificates from their verification pages")]
struct Cli {
    /// Re-enrich every certificate, discarding the existing cache
    #[arg(long)]
    force: bool,

    /// Directory holding certificates.json and certificates.enriched.json
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let enricher = certscout::Enricher::new();
    let options = RunOptions {
        data_dir: cli.data_dir,
        force: cli.force,
    };

    match run(&enricher, &options).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
