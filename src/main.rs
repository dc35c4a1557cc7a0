use bfbs::cli::{args::Args, commands};
use bfbs::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use clap::Parser;
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    match commands::run(args) {
        Ok(summary) if summary.is_success() => process::exit(EXIT_SUCCESS),
        Ok(_summary) => {
            // Per-file failures have already been logged and reported
            process::exit(EXIT_FAILURE);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(EXIT_FAILURE);
        }
    }
}
