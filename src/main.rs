mod cli;
mod commands;
mod domain;
mod error;
mod logging;
mod services;

use clap::Parser;
use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(logging::level_for_verbosity(cli.verbose));
    commands::dispatch(&cli)
}
