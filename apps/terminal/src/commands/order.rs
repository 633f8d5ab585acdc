//! # Order Commands
//!
//! Checkout. The front end's HTTP client sends the payload to
//! `POST /orders`; only after it succeeded does the cart get cleared.
//!
//! ```text
//! "Send order" ──► prepare_order(origin) ──► { request, json }
//!                                                 │
//!                               front end POSTs ◄─┘
//!                                     │
//!                     2xx ──► complete_order_submission() ──► empty cart
//!                     error ─► cart untouched, cashier retries
//! ```

use serde::Serialize;
use tracing::{debug, info};

use comanda_core::{OrderOrigin, OrderRequest};

use crate::commands::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{CartState, ConfigState};

/// Payload ready for the order service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedOrder {
    pub request: OrderRequest,

    /// `request` serialized as the request body
    pub json: String,

    /// Subtotal formatted with the terminal's currency
    pub subtotal_display: String,
}

/// Builds the order payload from the cart. The cart is not modified.
///
/// `origin` defaults to the terminal's configured origin (counter, or the
/// waiter's default table).
pub fn prepare_order(
    cart: &CartState,
    config: &ConfigState,
    origin: Option<OrderOrigin>,
) -> Result<PreparedOrder, ApiError> {
    debug!(origin = ?origin, "prepare_order command");

    let origin = match origin {
        Some(origin) => origin,
        None => config.default_origin()?,
    };

    let request = cart.with_cart(|c| OrderRequest::from_cart(c, origin))?;
    let json = serde_json::to_string(&request)
        .map_err(|e| ApiError::internal(format!("Cannot serialize order: {}", e)))?;

    info!(
        lines = request.lines.len(),
        items = request.item_count,
        subtotal = request.subtotal_cents,
        "Order prepared"
    );

    Ok(PreparedOrder {
        subtotal_display: config.format_currency(request.subtotal_cents),
        request,
        json,
    })
}

/// Clears the cart once the order service accepted the order.
pub fn complete_order_submission(cart: &CartState) -> CartResponse {
    debug!("complete_order_submission command");

    cart.with_cart_mut(|c| {
        let lines = c.line_count();
        c.clear();
        info!(lines, "Order submitted, cart cleared");
        CartResponse::from(&*c)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
