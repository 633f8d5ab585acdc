//! # Order Payload
//!
//! Turns the cart into the body of `POST /orders`. The engine never sends
//! it; the terminal hands it to the order service client.
//!
//! ## Payload Shape
//! ```json
//! {
//!   "origin": { "type": "waiter", "tableId": "12" },
//!   "lines": [{
//!     "productId": "pizza-grande",
//!     "quantity": 1,
//!     "observation": "",
//!     "sizeId": "s1",
//!     "addonIds": [],
//!     "flavorIds": ["f2"],
//!     "sizeSnapshot": { "id": "s1", "name": "Large", "priceCents": 4000 },
//!     "addonsSnapshot": [],
//!     "flavorsSnapshot": [{ "id": "f2", "name": "Calabresa", "priceCents": 4200 }],
//!     "unitPriceCents": 4200,
//!     "lineTotalCents": 4200
//!   }],
//!   "itemCount": 1,
//!   "subtotalCents": 4200
//! }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::line_item::{CartLineItem, ChoiceSnapshot, FlavorSnapshot};

/// Which surface the order comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrderOrigin {
    /// Counter sale on the POS.
    Pos,
    /// Table order taken by a waiter.
    Waiter {
        #[serde(rename = "tableId")]
        table_id: String,
    },
}

/// One line of the order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: i64,
    pub observation: String,
    pub size_id: Option<String>,
    pub addon_ids: Vec<String>,
    pub flavor_ids: Vec<String>,
    pub size_snapshot: Option<ChoiceSnapshot>,
    pub addons_snapshot: Vec<ChoiceSnapshot>,
    pub flavors_snapshot: Vec<FlavorSnapshot>,
    pub unit_price_cents: i64,
    pub line_total_cents: i64,
}

impl From<&CartLineItem> for OrderLine {
    fn from(line: &CartLineItem) -> Self {
        OrderLine {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            observation: line.observation.clone(),
            size_id: line.size_id.clone(),
            addon_ids: line.addon_ids.clone(),
            flavor_ids: line.flavor_ids.clone(),
            size_snapshot: line.size_snapshot.clone(),
            addons_snapshot: line.addons_snapshot.clone(),
            flavors_snapshot: line.flavors_snapshot.clone(),
            unit_price_cents: line.unit_price_cents,
            line_total_cents: line.line_total().cents(),
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub origin: OrderOrigin,
    pub lines: Vec<OrderLine>,
    pub item_count: i64,
    pub subtotal_cents: i64,
}

impl OrderRequest {
    /// Builds the request from the current cart.
    ///
    /// ## Errors
    /// - [`CoreError::EmptyCart`] if there is nothing to order
    /// - `Validation` if a waiter order has no table id
    pub fn from_cart(cart: &Cart, origin: OrderOrigin) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        if let OrderOrigin::Waiter { table_id } = &origin {
            if table_id.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "table id".to_string(),
                }
                .into());
            }
        }

        Ok(OrderRequest {
            origin,
            lines: cart.lines.iter().map(OrderLine::from).collect(),
            item_count: cart.total_quantity(),
            subtotal_cents: cart.subtotal().cents(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
