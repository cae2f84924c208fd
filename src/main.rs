mod cache;
mod cli;
mod error;
mod events;
mod manifest;
mod registry;
mod update;
mod version;
mod workflow;

use clap::Parser;
use cli::Cli;
use colored::Colorize;
use std::process;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var("BACKDATER_VERBOSE", "1");
        }
    }

    if let Err(e) = workflow::execute_update(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
