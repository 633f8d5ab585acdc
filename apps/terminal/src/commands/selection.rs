//! # Selection Commands
//!
//! Everything the options modal does between tapping a product tile and
//! tapping "Add to order".
//!
//! ## Modal Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Options Modal                                        │
//! │                                                                         │
//! │  Tap tile ─────────► open_product() ──────► DraftView (price, name)     │
//! │                                                                         │
//! │  Tap size ─────────► select_size() ───────► flavors cleared             │
//! │  Tap addon ────────► toggle_addon() ──────► single groups swap          │
//! │  Tap flavor ───────► toggle_flavor() ─────► full? limitReached = true   │
//! │  Stepper / note ───► set_draft_quantity() / set_draft_observation()     │
//! │                                                                         │
//! │  "Add to order" ───► confirm_draft() ─────► line in cart, modal closed  │
//! │  "Cancel" ─────────► cancel_draft() ──────► modal closed                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every response carries the live unit price so the modal never computes
//! prices on its own.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use comanda_core::pricing::{compose_display_name, compute_unit_price, effective_max_flavors};
use comanda_core::validation::{validate_observation, validate_quantity};
use comanda_core::{build_line_item, new_line_id, CoreError};

use crate::error::ApiError;
use crate::state::{CartState, CartTotals, CatalogState, Draft, DraftState};

/// What the options modal renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftView {
    pub product_id: String,

    /// "Pizza (Large) [Mussarela/Calabresa]"
    pub display_name: String,

    pub size_id: Option<String>,
    pub addon_ids: Vec<String>,
    pub flavor_ids: Vec<String>,

    /// Flavor limit at the selected size
    pub max_flavors: u32,

    pub quantity: i64,
    pub observation: String,

    /// `None` until the selection can be priced (e.g. a pizza with no
    /// size and no flavor yet)
    pub unit_price_cents: Option<i64>,
    pub line_total_cents: Option<i64>,

    /// The last flavor tap was ignored because the selection is full
    pub limit_reached: bool,
}

impl DraftView {
    fn of(draft: &Draft, limit_reached: bool) -> Self {
        let product = &draft.product;
        let selection = &draft.selection;
        let size = selection.selected_size(product).ok().flatten();

        let price_rule = product
            .pizza_config
            .as_ref()
            .map(|c| c.price_rule())
            .unwrap_or_default();

        let unit_price = compute_unit_price(
            product,
            size,
            &selection.addon_ids,
            &selection.flavors,
            price_rule,
        )
        .ok();

        DraftView {
            product_id: product.id.clone(),
            display_name: compose_display_name(product, size, &selection.flavors),
            size_id: selection.size_id.clone(),
            addon_ids: selection.addon_ids.clone(),
            flavor_ids: selection.flavor_ids(),
            max_flavors: effective_max_flavors(product, size.map(|s| s.name.as_str())),
            quantity: draft.quantity,
            observation: draft.observation.clone(),
            unit_price_cents: unit_price.map(|p| p.cents()),
            line_total_cents: unit_price.map(|p| p.multiply_quantity(draft.quantity).cents()),
            limit_reached,
        }
    }
}

/// Result of confirming the modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedLine {
    /// Line now holding the item
    pub line_id: String,

    /// True when an identical line absorbed the item
    pub merged: bool,

    pub name: String,
    pub totals: CartTotals,
}

/// Runs `f` on the open draft, or fails with `NOT_FOUND`.
fn with_open_draft<R>(
    draft: &DraftState,
    f: impl FnOnce(&mut Draft) -> Result<R, ApiError>,
) -> Result<R, ApiError> {
    draft
        .with_draft_mut(f)
        .unwrap_or_else(|| Err(ApiError::no_draft()))
}

/// Opens the options modal for a product, replacing any open draft.
pub fn open_product(
    catalog: &CatalogState,
    draft: &DraftState,
    product_id: &str,
) -> Result<DraftView, ApiError> {
    debug!(product_id = %product_id, "open_product command");

    let catalog = catalog.snapshot();
    let product = catalog.product(product_id)?;

    if !product.is_active {
        return Err(ApiError::validation(format!(
            "Product is not available: {}",
            product.name
        )));
    }

    let opened = Draft::open(product.clone());
    let view = DraftView::of(&opened, false);
    draft.with_slot(|slot| *slot = Some(opened));

    Ok(view)
}

/// Selects a size. Any chosen flavors are cleared.
pub fn select_size(draft: &DraftState, size_id: &str) -> Result<DraftView, ApiError> {
    debug!(size_id = %size_id, "select_size command");

    with_open_draft(draft, |d| {
        d.selection = d.selection.select_size(&d.product, size_id)?;
        Ok(DraftView::of(d, false))
    })
}

/// Toggles an addon; single-choice groups keep at most one.
pub fn toggle_addon(draft: &DraftState, addon_id: &str) -> Result<DraftView, ApiError> {
    debug!(addon_id = %addon_id, "toggle_addon command");

    with_open_draft(draft, |d| {
        d.selection = d.selection.toggle_addon(&d.product, addon_id)?;
        Ok(DraftView::of(d, false))
    })
}

/// Toggles a flavor.
///
/// A full selection is not an error: the draft is returned unchanged with
/// `limitReached` set so the modal can show a hint.
pub fn toggle_flavor(
    catalog: &CatalogState,
    draft: &DraftState,
    flavor_id: &str,
) -> Result<DraftView, ApiError> {
    debug!(flavor_id = %flavor_id, "toggle_flavor command");

    let catalog = catalog.snapshot();

    with_open_draft(draft, |d| {
        let candidate = catalog.flavor(&d.product, flavor_id)?;

        let deselecting = d.selection.flavors.iter().any(|f| f.id == candidate.id);
        if !candidate.is_active && !deselecting {
            return Err(ApiError::validation(format!(
                "Flavor is not available: {}",
                candidate.name
            )));
        }

        match d.selection.toggle_flavor(&d.product, candidate) {
            Ok(next) => {
                d.selection = next;
                Ok(DraftView::of(d, false))
            }
            Err(CoreError::SelectionLimitReached { max }) => {
                debug!(flavor_id = %flavor_id, max, "Flavor limit reached");
                Ok(DraftView::of(d, true))
            }
            Err(e) => Err(e.into()),
        }
    })
}

/// Sets the stepper quantity (1..=999).
pub fn set_draft_quantity(draft: &DraftState, quantity: i64) -> Result<DraftView, ApiError> {
    debug!(quantity, "set_draft_quantity command");

    with_open_draft(draft, |d| {
        validate_quantity(quantity).map_err(CoreError::from)?;
        d.quantity = quantity;
        Ok(DraftView::of(d, false))
    })
}

/// Sets the kitchen note. Stored trimmed.
pub fn set_draft_observation(draft: &DraftState, observation: &str) -> Result<DraftView, ApiError> {
    debug!(len = observation.len(), "set_draft_observation command");

    with_open_draft(draft, |d| {
        d.observation = validate_observation(observation).map_err(CoreError::from)?;
        Ok(DraftView::of(d, false))
    })
}

/// Current draft, for re-rendering the modal.
pub fn get_draft(draft: &DraftState) -> Result<DraftView, ApiError> {
    debug!("get_draft command");
    with_open_draft(draft, |d| Ok(DraftView::of(d, false)))
}

/// Closes the modal without adding anything.
///
/// ## Returns
/// Whether a draft was open.
pub fn cancel_draft(draft: &DraftState) -> bool {
    debug!("cancel_draft command");
    draft.with_slot(|slot| slot.take().is_some())
}

/// Prices the draft, adds it to the cart and closes the modal.
///
/// On any error the draft stays open so the cashier can fix it.
pub fn confirm_draft(draft: &DraftState, cart: &CartState) -> Result<ConfirmedLine, ApiError> {
    debug!("confirm_draft command");

    draft.with_slot(|slot| {
        let open = slot.as_ref().ok_or_else(ApiError::no_draft)?;

        let new_id = new_line_id();
        let line = build_line_item(
            new_id.clone(),
            &open.product,
            &open.selection,
            open.quantity,
            &open.observation,
        )?;
        let name = line.name.clone();
        let unit_price = line.unit_price_cents;
        let quantity = line.quantity;

        let (line_id, totals) = cart.with_cart_mut(|c| {
            let id = c.add_line(line)?;
            Ok::<_, CoreError>((id, CartTotals::from(&*c)))
        })?;

        *slot = None;

        let merged = line_id != new_id;
        info!(
            line_id = %line_id,
            name = %name,
            unit_price = unit_price,
            quantity = quantity,
            merged = merged,
            "Line added to cart"
        );

        Ok::<_, ApiError>(ConfirmedLine {
            line_id,
            merged,
            name,
            totals,
        })
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
