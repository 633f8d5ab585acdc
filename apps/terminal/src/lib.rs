//! # Comanda Terminal Library
//!
//! Host layer shared by the POS counter screen and the waiter app. It owns
//! the UI-facing state and exposes one command function per UI event; all
//! pricing and cart rules live in `comanda-core`.
//!
//! ## Module Organization
//! ```text
//! comanda_terminal/
//! ├── lib.rs           ◄─── You are here (startup & tracing)
//! ├── config.rs        ◄─── TerminalConfig: defaults → toml → env
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   ├── catalog.rs   ◄─── Catalog snapshot
//! │   ├── draft.rs     ◄─── Product being configured in the modal
//! │   ├── cart.rs      ◄─── Cart state management
//! │   └── config.rs    ◄─── Read-only configuration
//! ├── commands/
//! │   ├── mod.rs       ◄─── Command exports
//! │   ├── product.rs   ◄─── Product grid, flavor options, catalog reload
//! │   ├── selection.rs ◄─── Options modal (size, addons, flavors)
//! │   ├── cart.rs      ◄─── Cart manipulation
//! │   ├── order.rs     ◄─── Order payload and checkout
//! │   └── ticket.rs    ◄─── Replaying saved tickets
//! └── error.rs         ◄─── API error type for commands
//! ```
//!
//! ## State Management (Multiple State Types)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Terminal State                                       │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │ CatalogState │ │  DraftState  │ │  CartState   │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ • Products   │ │ • Product    │ │ • Lines      │ │ • Store name │   │
//! │  │ • Categories │ │ • Selection  │ │ • Totals     │ │ • Origin     │   │
//! │  │              │ │ • Qty, note  │ │              │ │ • Currency   │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  Each command takes only the state it needs.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::path::{Path, PathBuf};

use tracing::info;
use tracing_subscriber::EnvFilter;

use comanda_core::Catalog;

use config::TerminalConfig;
use error::ApiError;
use state::{CartState, CatalogState, ConfigState, DraftState};

/// All state a terminal session needs, bundled for the host to hand out.
#[derive(Debug)]
pub struct Terminal {
    pub catalog: CatalogState,
    pub draft: DraftState,
    pub cart: CartState,
    pub config: ConfigState,
}

impl Terminal {
    /// Creates a terminal over an already loaded catalog.
    pub fn new(config: TerminalConfig, catalog: Catalog) -> Self {
        Terminal {
            catalog: CatalogState::new(catalog),
            draft: DraftState::new(),
            cart: CartState::new(),
            config: ConfigState::new(config),
        }
    }

    /// Boots a terminal from configuration.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  1. Load config (defaults → terminal.toml → COMANDA_* env)          │
    /// │  2. Read the catalog snapshot from `catalog_path`, if set           │
    /// │  3. Validate every product                                          │
    /// │  4. Initialize state objects (empty draft, empty cart)              │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn start(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = TerminalConfig::load_or_default(config_path);

        let catalog = match config.catalog_path.as_deref() {
            Some(path) => load_catalog(path)?,
            None => Catalog::default(),
        };

        info!(
            store = %config.store_name,
            origin = %config.origin,
            products = catalog.products.len(),
            "Terminal started"
        );

        Ok(Terminal::new(config, catalog))
    }
}

/// Reads and validates a catalog snapshot from disk.
pub fn load_catalog(path: &Path) -> Result<Catalog, ApiError> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        ApiError::internal(format!("Cannot read catalog {}: {}", path.display(), e))
    })?;

    let catalog = Catalog::from_json(&json)?;
    catalog.validate()?;

    Ok(catalog)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Catalog data the engine cannot use
/// - WARN: Configuration fallbacks
/// - INFO: Lines confirmed, orders prepared, catalog reloads
/// - DEBUG: Every command with its arguments
///
/// Logs go to stderr; stdout carries command output (see `price-check`).
///
/// ## Environment Override
/// Set `RUST_LOG` to override, e.g.: `RUST_LOG=comanda=trace`
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,comanda=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================================================
// Unit Tests
// =============================================================================
