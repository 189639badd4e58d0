// School Calendar
// Command-line entry point

use clap::Parser;
use school_calendar::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting School Calendar");

    cli::run(Cli::parse())
}
