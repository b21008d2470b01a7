mod cli;
mod config;
mod error;
mod logging;
mod output;
mod progress;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use crate::progress::CliProgressHandler;
use clap::Parser;
use confens::analysis::progress::ProgressReporter;
use confens::workflows::analyze;
use tracing::{debug, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, &cli.log_file)?;

    info!("Confens CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let analyze_config = config::resolve(&cli)?;
    debug!("Resolved analysis configuration: {:?}", &analyze_config);

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.callback());

    let report = analyze::run(&cli.path, &analyze_config, &reporter)?;

    info!(
        "Analysis finished: {} conformer(s), {} folded and {} unfolded candidate(s).",
        report.conformer_count,
        report.folded.candidates.len(),
        report.unfolded.candidates.len()
    );
    output::print_report(&report);

    Ok(())
}
