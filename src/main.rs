//! CLI entry point for the tile map reconciliation tool

use std::process::ExitCode;

use clap::Parser;
use gridmerge::io::cli::{Cli, CommandProcessor};
use gridmerge::io::logging::init_tracing;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let (verbose, silent) = (cli.verbose, cli.silent);
    let processor = CommandProcessor::new(cli);
    init_tracing(verbose, silent, processor.display());

    match processor.process() {
        Ok(summary) => {
            tracing::info!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
