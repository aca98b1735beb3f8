mod batch;
mod classifier;
mod cli;
mod converter;
mod error;
mod fmt;
mod importer;
mod models;
#[cfg(test)]
mod test_support;
mod transformer;

use clap::Parser;
use env_logger::Env;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = cli::convert::run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
