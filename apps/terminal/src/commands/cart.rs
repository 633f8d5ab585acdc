//! # Cart Commands
//!
//! Cart manipulation after lines have been confirmed from the modal.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Payload  │────►│  Order   │       │
//! │  │  Cart    │     │          │     │ prepared │     │   sent   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                  confirm_draft     prepare_order   complete_order_      │
//! │                  adjust_cart_line  (order.rs)      submission           │
//! │                  remove_cart_line                         │             │
//! │                        │                                  │             │
//! │                        ▼                                  ▼             │
//! │                   clear_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use comanda_core::{Cart, CartLineItem};

use crate::error::ApiError;
use crate::state::{CartState, CartTotals};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Changes a line's quantity by `delta` (the +/- buttons).
///
/// Reaching zero removes the line; going below zero is clamped.
pub fn adjust_cart_line(
    cart: &CartState,
    line_id: &str,
    delta: i64,
) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, delta, "adjust_cart_line command");

    cart.with_cart_mut(|c| {
        let remaining = c.adjust_quantity(line_id, delta)?;
        if remaining == 0 {
            debug!(line_id = %line_id, "Line removed at zero quantity");
        }
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Removes a line regardless of its quantity.
pub fn remove_cart_line(cart: &CartState, line_id: &str) -> Result<CartResponse, ApiError> {
    debug!(line_id = %line_id, "remove_cart_line command");

    cart.with_cart_mut(|c| {
        c.remove_line(line_id)?;
        Ok::<_, ApiError>(CartResponse::from(&*c))
    })
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
