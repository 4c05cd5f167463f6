//! ab-core: Bayesian A/B/N evaluation CLI.

use ab_core::cli::{run, Cli};
use ab_core::logging::init_logging;
use clap::Parser;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.format.is_json());
    let code = run(&cli);
    std::process::exit(code.as_i32());
}
