//! Fiscal Correction Engine CLI
//!
//! Command-line interface for classifying ledger exports and computing tax
//! corrections.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- grootboek.csv > correcties.csv
//! cargo run -- --strategy async grootboek.csv -o correcties.csv
//! cargo run -- --delimiter ';' --strict grootboek.csv > correcties.csv
//! cargo run -- --ev-threshold 2500 --ev-excess-rate 0.8 grootboek.csv > correcties.csv
//! ```
//!
//! The program reads the ledger from the input CSV file, classifies and
//! corrects every row using the selected processing strategy, and writes the
//! input table extended with the derived columns to stdout or `--output`.
//! Diagnostics go to stderr; set `RUST_LOG` to change their verbosity.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid options, file not found, missing columns, etc.)

use fiscal_correction_engine::cli;
use fiscal_correction_engine::strategy;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Parse command-line arguments using clap
    let args = cli::parse_args();

    let options = match args.to_processing_options() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    // Create the appropriate processing strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy.clone(), options, config)
    };

    let mut output: Box<dyn Write> = match &args.output_file {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(BufWriter::new(file)),
            Err(e) => {
                eprintln!("Error: Failed to create '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        drop(output);
        // no partial output file on failure
        if let Some(path) = &args.output_file {
            let _ = std::fs::remove_file(path);
        }
        process::exit(1);
    }
}
