//! Command-line front end for the survey dashboard.
//!
//! Parses arguments, delegates to `commands::run`, prints errors to stderr
//! and exits non-zero on failure.

mod args;
mod commands;
mod config;
mod errors;
mod render;

use args::Cli;

fn main() {
    if let Err(err) = commands::run(Cli::parse_args()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
