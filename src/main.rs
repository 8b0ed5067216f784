//! listfiles - flatten a directory tree into one annotated text snapshot
//!
//! listfiles provides:
//! - Top-down traversal that prunes excluded directories before entering them
//! - Strict UTF-8 reading with per-file error reporting
//! - A single output file with one `===== name =====` block per collected file

use clap::Parser;
use std::process::ExitCode;

mod backends;
mod cli;
mod core;
mod flows;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    crate::core::logger::setup_logging(cli.verbose, cli.quiet, cli.no_color);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{}", err);
            ExitCode::from(cli::exit_code(&err))
        }
    }
}
