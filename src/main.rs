//! Endpoints-from-source - Command-line tool for extracting API endpoint metadata.
//!
//! This binary analyzes annotated Java source (Spring-style controllers and
//! DTOs) and emits a structured document describing routes, parameters and
//! payload shapes, without executing any of the analyzed code.
//!
//! # Usage
//!
//! ```bash
//! endpoints-from-source [OPTIONS] <PROJECT_PATH>
//! ```
//!
//! # Examples
//!
//! Extract from a project directory into a JSON file:
//! ```bash
//! endpoints-from-source ./my-api-project -o endpoints.json
//! ```
//!
//! Extract from specific files as YAML:
//! ```bash
//! endpoints-from-source --files src/UserController.java src/dto/UserDto.java -f yaml
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! endpoints-from-source ./my-api-project -v
//! ```

mod cli;
mod detector;
mod document_builder;
mod dto_resolver;
mod error;
mod extractor;
mod parser;
mod scanner;
mod serializer;
mod type_parser;

use anyhow::Result;
use clap::Parser;
use log::info;

fn main() -> Result<()> {
    // Parse args before logger init so the verbose flag can pick the level
    let args_for_verbose = cli::CliArgs::parse();

    let log_level = if args_for_verbose.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("Endpoints-from-source starting...");

    // Now do the full validation pass
    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    // Run the main workflow
    cli::run(args)?;

    info!("Endpoint metadata extraction completed successfully");

    Ok(())
}
