#![deny(clippy::all, clippy::pedantic)]
//! capdiff-rev — diff the capabilities of Go packages between two git
//! revisions.

use clap::Parser;

use capdiff::cli::{self, RevCli};
use capdiff::commands;
use capdiff::snapshot::EXIT_ERROR;

fn main() {
    let cli = RevCli::parse();
    cli::init_logging(cli.verbose);

    match commands::rev::run(&cli) {
        Ok(false) => {}
        Ok(true) => std::process::exit(1),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(EXIT_ERROR);
        }
    }
}
