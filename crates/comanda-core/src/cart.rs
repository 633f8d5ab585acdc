//! # Cart
//!
//! The order in progress: an ordered list of [`CartLineItem`]s.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Confirm modal ─────► add_line(line) ──┬─► same key? quantity += n      │
//! │                                        └─► new key?  lines.push(line)   │
//! │                                                                         │
//! │  Tap +/- ───────────► adjust_quantity(id, ±1)                           │
//! │                          └─► reaches 0? line removed                    │
//! │                                                                         │
//! │  Order sent ────────► clear()                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share a [`crate::line_item::LineKey`]
//! - Every line has quantity in 1..=MAX_ITEM_QUANTITY
//! - At most MAX_CART_LINES lines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::line_item::CartLineItem;
use crate::money::Money;
use crate::validation::validate_cart_size;
use crate::{MAX_CART_LINES, MAX_ITEM_QUANTITY};

/// The shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub lines: Vec<CartLineItem>,

    /// When the cart was created/last cleared
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds a line, merging it into an identical configuration if present.
    ///
    /// ## Behavior
    /// - Same product, size, addons and flavors already in cart: the existing
    ///   line's quantity grows by the incoming quantity. The existing line's
    ///   observation is kept and the incoming one is dropped.
    /// - Otherwise the line is appended.
    ///
    /// ## Returns
    /// The id of the line that now holds the item.
    pub fn add_line(&mut self, line: CartLineItem) -> CoreResult<String> {
        let key = line.key();

        if let Some(existing) = self.lines.iter_mut().find(|l| l.key() == key) {
            let new_qty = existing.quantity.saturating_add(line.quantity);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(existing.id.clone());
        }

        validate_cart_size(self.lines.len()).map_err(|_| CoreError::CartTooLarge {
            max: MAX_CART_LINES,
        })?;

        let id = line.id.clone();
        self.lines.push(line);
        Ok(id)
    }

    /// Changes a line's quantity by `delta`.
    ///
    /// The result is floored at zero, and zero removes the line.
    ///
    /// ## Returns
    /// The remaining quantity (0 when the line was removed).
    pub fn adjust_quantity(&mut self, line_id: &str, delta: i64) -> CoreResult<i64> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        let new_qty = self.lines[index].quantity.saturating_add(delta).max(0);

        if new_qty > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: new_qty,
                max: MAX_ITEM_QUANTITY,
            });
        }

        if new_qty == 0 {
            self.lines.remove(index);
        } else {
            self.lines[index].quantity = new_qty;
        }

        Ok(new_qty)
    }

    /// Removes a line by id.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<CartLineItem> {
        let index = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        Ok(self.lines.remove(index))
    }

    /// Looks up a line by id.
    pub fn find(&self, line_id: &str) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Clears all lines (after the order was submitted, or on cancel).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
    }

    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all extended prices.
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_item::build_line_item;
    use crate::selection::SelectionState;
    use crate::types::{Addon, AddonGroup, Product, SelectionMode, Size};

    fn burger() -> Product {
        Product {
            id: "burger".to_string(),
            name: "X-Burger".to_string(),
            price_cents: Some(2500),
            category_id: None,
            is_active: true,
            sizes: vec![Size {
                id: "double".to_string(),
                name: "Double".to_string(),
                price_cents: 3000,
            }],
            addon_groups: vec![AddonGroup {
                id: "extras".to_string(),
                name: "Extras".to_string(),
                mode: SelectionMode::Multi,
                addons: vec![
                    Addon {
                        id: "bacon".to_string(),
                        name: "Bacon".to_string(),
                        price_cents: 350,
                    },
                    Addon {
                        id: "egg".to_string(),
                        name: "Egg".to_string(),
                        price_cents: 200,
                    },
                ],
            }],
            pizza_config: None,
        }
    }

    fn line(id: &str, selection: &SelectionState, qty: i64, observation: &str) -> CartLineItem {
        build_line_item(id, &burger(), selection, qty, observation).unwrap()
    }

    fn with_extras(order: &[&str]) -> SelectionState {
        let product = burger();
        order.iter().fold(
            SelectionState::new().select_size(&product, "double").unwrap(),
            |state, id| state.toggle_addon(&product, id).unwrap(),
        )
    }

    #[test]
    fn test_add_line_and_totals() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&["bacon", "egg"]), 2, ""))
            .unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal().cents(), 7100);
    }

    #[test]
    fn test_identical_configuration_merges() {
        let mut cart = Cart::new();
        let first = cart
            .add_line(line("l1", &with_extras(&["bacon", "egg"]), 1, "no onions"))
            .unwrap();
        let second = cart
            .add_line(line("l2", &with_extras(&["egg", "bacon"]), 1, "extra sauce"))
            .unwrap();

        assert_eq!(first, "l1");
        assert_eq!(second, "l1");
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].observation, "no onions");
    }

    #[test]
    fn test_different_configuration_appends() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&["bacon"]), 1, "")).unwrap();
        cart.add_line(line("l2", &with_extras(&[]), 1, "")).unwrap();
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&["bacon"]), 1, "")).unwrap();
        cart.add_line(line("l2", &with_extras(&[]), 1, "")).unwrap();

        let remaining = cart.adjust_quantity("l1", -1).unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(cart.line_count(), 1);
        assert!(cart.find("l1").is_none());
    }

    #[test]
    fn test_adjust_floors_at_zero() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&[]), 3, "")).unwrap();

        assert_eq!(cart.adjust_quantity("l1", 1).unwrap(), 4);
        assert_eq!(cart.adjust_quantity("l1", -10).unwrap(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_adjust_unknown_line() {
        let mut cart = Cart::new();
        assert!(matches!(
            cart.adjust_quantity("nope", 1),
            Err(CoreError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_quantity_cap() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&[]), MAX_ITEM_QUANTITY, ""))
            .unwrap();

        assert!(matches!(
            cart.adjust_quantity("l1", 1),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            cart.add_line(line("l2", &with_extras(&[]), 1, "")),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.lines[0].quantity, MAX_ITEM_QUANTITY);
    }

    #[test]
    fn test_huge_delta_does_not_wrap() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&[]), 1, "")).unwrap();

        assert!(matches!(
            cart.adjust_quantity("l1", i64::MAX),
            Err(CoreError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.lines[0].quantity, 1);

        assert_eq!(cart.adjust_quantity("l1", i64::MIN).unwrap(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_line_limit() {
        let mut cart = Cart::new();
        let base = line("l0", &with_extras(&[]), 1, "");
        for i in 0..MAX_CART_LINES {
            let mut next = base.clone();
            next.id = format!("l{i}");
            next.product_id = format!("p{i}");
            cart.add_line(next).unwrap();
        }

        let mut overflow = base.clone();
        overflow.product_id = "overflow".to_string();
        assert!(matches!(
            cart.add_line(overflow),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_line(line("l1", &with_extras(&["bacon"]), 1, "")).unwrap();
        cart.add_line(line("l2", &with_extras(&[]), 1, "")).unwrap();

        let removed = cart.remove_line("l2").unwrap();
        assert_eq!(removed.id, "l2");
        assert!(cart.remove_line("l2").is_err());

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().cents(), 0);
    }
}
