//! # Cart State
//!
//! Holds the cart being built on this terminal.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Front-end Action         Command                 Cart State Change     │
//! │  ────────────────         ───────                 ─────────────────     │
//! │                                                                         │
//! │  Confirm modal ──────────► confirm_draft() ─────► add_line (or merge)   │
//! │                                                                         │
//! │  Tap + / - ──────────────► adjust_cart_line() ──► qty ± 1, 0 removes    │
//! │                                                                         │
//! │  Swipe line ─────────────► remove_cart_line() ──► lines.remove(i)       │
//! │                                                                         │
//! │  Order sent ─────────────► complete_order_submission() ─► clear()       │
//! │                                                                         │
//! │  NOTE: All operations acquire the Mutex lock exclusively.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

use comanda_core::Cart;

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
        }
    }
}

/// Shared cart state.
///
/// A poisoned lock is recovered: the cart holds plain values and every
/// mutation in `comanda-core` either completes or leaves it untouched.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use comanda_terminal::state::{CartState, CartTotals};
    ///
    /// let cart_state = CartState::new();
    /// let totals = cart_state.with_cart(|c| CartTotals::from(c));
    /// assert_eq!(totals.line_count, 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}
