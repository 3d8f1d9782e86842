#![deny(clippy::all, clippy::pedantic)]
//! capdiff-pkg — diff the capabilities of a Go module between two published
//! versions, via the analyzer's comparison mode.

use clap::Parser;

use capdiff::cli::{self, PkgCli};
use capdiff::commands;
use capdiff::snapshot::EXIT_ERROR;

fn main() {
    let cli = PkgCli::parse();
    cli::init_logging(cli.verbose);

    match commands::pkg::run(&cli) {
        // The analyzer's comparison mode owns the report and the verdict;
        // its exit code is propagated verbatim so callers can tell
        // "found differences" from "tool failure".
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(EXIT_ERROR);
        }
    }
}
