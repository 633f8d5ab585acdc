//! # comanda-core: Order Pricing and Composition Engine
//!
//! This crate is the **heart** of Comanda POS. It turns a catalog product and
//! the cashier's choices into a priced cart line, keeps the cart, and builds
//! the order payload. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comanda POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (POS screen, waiter app)                 │   │
//! │  │    Product grid ──► Options modal ──► Cart ──► Send order       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                comanda-terminal (host layer)                    │   │
//! │  │    open_product, toggle_flavor, confirm_draft, prepare_order    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comanda-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   types ─► selection ─► pricing ─► line_item ─► cart ─► order   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Catalog service (GET /products)      Order service (POST /orders)     │
//! │         external                              external                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog records (Product, Size, AddonGroup, PizzaConfig)
//! - [`catalog`] - In-memory catalog snapshot and flavor lookup
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`selection`] - Immutable selection state and toggle rules
//! - [`pricing`] - Base price, flavor rules, addon surcharge, display name
//! - [`line_item`] - Cart-ready line items with price snapshots
//! - [`cart`] - Merge-on-identical-configuration cart
//! - [`order`] - `POST /orders` payload
//! - [`error`] - Domain error types
//! - [`validation`] - Input and catalog validation
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::{build_line_item, Cart, Catalog, SelectionState};
//!
//! let catalog = Catalog::from_json(r#"{ "products": [
//!     { "id": "pizza", "name": "Pizza Grande",
//!       "sizes": [{ "id": "s1", "name": "Large", "priceCents": 4000 }],
//!       "pizzaConfig": { "flavorCategoryId": "cat1", "maxFlavors": 1, "priceRule": "higher" } },
//!     { "id": "f1", "name": "Calabresa", "categoryId": "cat1", "priceCents": 3800,
//!       "sizes": [{ "id": "x", "name": "Large", "priceCents": 4200 }] }
//! ] }"#).unwrap();
//!
//! let pizza = catalog.product("pizza").unwrap();
//! let calabresa = catalog.flavor(pizza, "f1").unwrap();
//!
//! let selection = SelectionState::new()
//!     .select_size(pizza, "s1").unwrap()
//!     .toggle_flavor(pizza, calabresa).unwrap();
//!
//! let line = build_line_item("line-1", pizza, &selection, 1, "").unwrap();
//! assert_eq!(line.name, "Pizza Grande (Large) [Calabresa]");
//! assert_eq!(line.unit_price_cents, 4200);
//!
//! let mut cart = Cart::new();
//! cart.add_line(line).unwrap();
//! assert_eq!(cart.subtotal().cents(), 4200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod line_item;
pub mod money;
pub mod order;
pub mod pricing;
pub mod selection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use line_item::{build_line_item, new_line_id, CartLineItem, ChoiceSnapshot, FlavorSnapshot};
pub use money::Money;
pub use order::{OrderLine, OrderOrigin, OrderRequest};
pub use selection::SelectionState;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// Guards against typing 1000 instead of 10 on the quantity pad.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum catalog price of a single size, addon or flavor, in cents.
///
/// Keeps every line total well inside `i64` at the quantity and cart limits.
pub const MAX_PRICE_CENTS: i64 = 10_000_000;

/// Maximum length of the free-text kitchen note.
pub const MAX_OBSERVATION_LEN: usize = 500;
