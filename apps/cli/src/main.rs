//! # Atlas Storefront CLI Entry Point
//!
//! ```text
//! $ atlas add --id pastel-1 --name "Pastel Satin" --price 200000 --image /img/pastel-1.jpg
//! $ atlas show
//! $ atlas checkout --full-name "..." --phone "..." --address "..." --agree-to-terms
//! ```
//!
//! Successful commands print JSON on stdout and exit 0. Failures print an
//! `ApiError` as JSON on stderr and exit 1.

use std::process::ExitCode;

use atlas_cli_lib::cli::Cli;
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    atlas_cli_lib::init_tracing();

    match atlas_cli_lib::run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            let rendered = serde_json::to_string_pretty(&err).unwrap_or_else(|_| err.to_string());
            eprintln!("{}", rendered);
            ExitCode::FAILURE
        }
    }
}
