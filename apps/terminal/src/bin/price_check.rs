//! # Price Check
//!
//! Replays a saved ticket against a catalog snapshot and prints the order
//! payload the terminal would send. Handy for checking a new catalog's
//! pizza pricing before it goes live.
//!
//! ## Usage
//! ```bash
//! cargo run -p comanda-terminal --bin price-check -- catalog.json ticket.json
//!
//! # Use a specific terminal config (origin, currency)
//! cargo run -p comanda-terminal --bin price-check -- catalog.json ticket.json --config terminal.toml
//! ```
//!
//! Exits non-zero if the catalog is invalid or any ticket item fails.

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::error;

use comanda_terminal::commands::ticket::{replay_ticket, Ticket};
use comanda_terminal::config::TerminalConfig;
use comanda_terminal::error::ApiError;
use comanda_terminal::{init_tracing, load_catalog, Terminal};

fn print_usage() {
    println!("Comanda price check");
    println!();
    println!("Usage: price-check <CATALOG> <TICKET> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Terminal config file (default: platform config dir)");
    println!("  -h, --help           Show this help message");
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();

    let mut positional = Vec::new();
    let mut config_path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                return ExitCode::SUCCESS;
            }
            other => positional.push(PathBuf::from(other)),
        }
        i += 1;
    }

    let [catalog_path, ticket_path] = positional.as_slice() else {
        print_usage();
        return ExitCode::from(2);
    };

    match run(catalog_path, ticket_path, config_path) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            eprintln!("price-check: {}", e.message);
            ExitCode::FAILURE
        }
    }
}

fn run(
    catalog_path: &Path,
    ticket_path: &Path,
    config_path: Option<PathBuf>,
) -> Result<String, ApiError> {
    let config = TerminalConfig::load(config_path)?;
    let catalog = load_catalog(catalog_path)?;

    let ticket_json = std::fs::read_to_string(ticket_path).map_err(|e| {
        ApiError::internal(format!("Cannot read ticket {}: {}", ticket_path.display(), e))
    })?;
    let ticket: Ticket = serde_json::from_str(&ticket_json)
        .map_err(|e| ApiError::validation(format!("Invalid ticket: {}", e)))?;

    let terminal = Terminal::new(config, catalog);
    let prepared = replay_ticket(&terminal, &ticket)?;

    serde_json::to_string_pretty(&prepared.request)
        .map_err(|e| ApiError::internal(format!("Cannot serialize order: {}", e)))
}
