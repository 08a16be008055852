// src/bin/labelscout.rs
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use labelscout_core::cli::{dispatch, Cli};
use labelscout_core::exit::ScoutExit;

fn main() -> ScoutExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch::execute(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ScoutExit::for_error(&e)
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "warn,labelscout_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
