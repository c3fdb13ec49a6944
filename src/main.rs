mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod fs;
mod importer;
mod logging;
mod output;
mod policy;
mod scan;

use clap::Parser;
use error::ErrorFormatter;

fn main() {
    let cli = cli::Cli::parse();
    let verbose = cli.verbose;

    logging::init(verbose);

    if let Err(err) = commands::dispatch(cli) {
        tracing::debug!(error = ?err, "command failed");
        eprintln!("{}", ErrorFormatter::new(verbose).format(&err));
        std::process::exit(1);
    }
}
