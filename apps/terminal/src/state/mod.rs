//! # State Module
//!
//! Terminal state, one type per concern. Commands declare exactly the state
//! they need.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │ CatalogState │  │  DraftState  │  │  CartState   │  │ ConfigState │ │
//! │  │              │  │              │  │              │  │             │ │
//! │  │  RwLock<Arc< │  │  Mutex<      │  │  Arc<Mutex<  │  │ Terminal-   │ │
//! │  │    Catalog   │  │   Option<    │  │    Cart      │  │  Config     │ │
//! │  │  >>          │  │    Draft>>   │  │  >>          │  │             │ │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘ │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: snapshots are immutable, reload swaps the Arc         │
//! │  • DraftState / CartState: exclusive lock per command                  │
//! │  • ConfigState: read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod config;
mod draft;

pub use cart::{CartState, CartTotals};
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use draft::{Draft, DraftState};
