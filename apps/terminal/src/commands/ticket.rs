//! # Ticket Replay
//!
//! A ticket is a saved list of selections, the same taps a cashier would
//! make. Replaying it drives the selection and order commands in order and
//! yields the payload the terminal would send. Used by the `price-check`
//! binary to audit catalog pricing.
//!
//! ## Ticket Format
//! ```json
//! {
//!   "origin": { "type": "waiter", "tableId": "4" },
//!   "items": [
//!     { "productId": "pizza", "sizeId": "s1", "flavorIds": ["f1", "f2"] },
//!     { "productId": "soda", "quantity": 2, "observation": "no ice" }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{debug, info};

use comanda_core::OrderOrigin;

use crate::commands::order::{prepare_order, PreparedOrder};
use crate::commands::selection::{
    confirm_draft, open_product, select_size, set_draft_observation, set_draft_quantity,
    toggle_addon, toggle_flavor,
};
use crate::error::{ApiError, ErrorCode};
use crate::state::{CartState, CatalogState, DraftState};
use crate::Terminal;

/// A saved order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Falls back to the terminal's configured origin
    #[serde(default)]
    pub origin: Option<OrderOrigin>,
    pub items: Vec<TicketItem>,
}

/// One product as configured in the options modal.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketItem {
    pub product_id: String,
    #[serde(default)]
    pub size_id: Option<String>,
    #[serde(default)]
    pub addon_ids: Vec<String>,
    #[serde(default)]
    pub flavor_ids: Vec<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub observation: String,
}

fn default_quantity() -> i64 {
    1
}

/// Replays a ticket and prepares its order.
///
/// Items are replayed into a scratch draft and cart, so a failing item
/// leaves the terminal untouched; the error message names the item. On
/// success the replayed cart becomes the terminal's cart, which must be
/// empty at that point. A ticket naming more flavors than the size allows
/// fails with `SELECTION_LIMIT`.
pub fn replay_ticket(terminal: &Terminal, ticket: &Ticket) -> Result<PreparedOrder, ApiError> {
    debug!(items = ticket.items.len(), "replay_ticket command");

    let draft = DraftState::new();
    let replayed = CartState::new();

    for (index, item) in ticket.items.iter().enumerate() {
        replay_item(&terminal.catalog, &draft, &replayed, item).map_err(|e| {
            ApiError::new(
                e.code,
                format!("item {} ({}): {}", index + 1, item.product_id, e.message),
            )
        })?;
    }

    let prepared = prepare_order(&replayed, &terminal.config, ticket.origin.clone())?;

    let cart = replayed.with_cart(|c| c.clone());
    terminal.cart.with_cart_mut(|c| {
        if !c.is_empty() {
            return Err(ApiError::new(
                ErrorCode::CartError,
                "Cart already has lines; clear it before replaying a ticket",
            ));
        }
        *c = cart;
        Ok(())
    })?;

    info!(lines = prepared.request.lines.len(), "Ticket replayed");
    Ok(prepared)
}

fn replay_item(
    catalog: &CatalogState,
    draft: &DraftState,
    cart: &CartState,
    item: &TicketItem,
) -> Result<(), ApiError> {
    let mut view = open_product(catalog, draft, &item.product_id)?;

    if let Some(size_id) = &item.size_id {
        view = select_size(draft, size_id)?;
    }

    for addon_id in &item.addon_ids {
        toggle_addon(draft, addon_id)?;
    }

    if item.flavor_ids.len() > view.max_flavors as usize {
        return Err(ApiError::new(
            ErrorCode::SelectionLimit,
            format!(
                "{} flavors listed, at most {} can be selected",
                item.flavor_ids.len(),
                view.max_flavors
            ),
        ));
    }

    let mut seen = HashSet::new();
    for flavor_id in &item.flavor_ids {
        if !seen.insert(flavor_id.as_str()) {
            return Err(ApiError::validation(format!(
                "Flavor listed twice: {}",
                flavor_id
            )));
        }

        let view = toggle_flavor(catalog, draft, flavor_id)?;
        if view.limit_reached {
            return Err(ApiError::new(
                ErrorCode::SelectionLimit,
                format!("at most {} flavors can be selected", view.max_flavors),
            ));
        }
    }

    set_draft_quantity(draft, item.quantity)?;
    set_draft_observation(draft, &item.observation)?;
    confirm_draft(draft, cart)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
