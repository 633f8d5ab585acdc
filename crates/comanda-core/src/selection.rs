//! # Selection State
//!
//! What the cashier has picked so far for the product open in the
//! configuration modal.
//!
//! ## One Value, Replaced Wholesale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tap size ─────► state.select_size(..)    ──► new SelectionState        │
//! │  tap addon ────► state.toggle_addon(..)   ──► new SelectionState        │
//! │  tap flavor ───► state.toggle_flavor(..)  ──► new SelectionState        │
//! │                                            └► SelectionLimitReached     │
//! │                                                                         │
//! │  The old value is never mutated. Events are applied in the order the   │
//! │  user performed them: flavor order drives the display name.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::pricing::effective_max_flavors;
use crate::types::{Product, SelectionMode, Size};

/// Toggles a flavor within an ordered selection.
///
/// ## Rules
/// 1. Already selected → removed. Deselecting is always allowed.
/// 2. Room left → appended, preserving selection order.
/// 3. Full and `max_flavors == 1` → replaces the selection (radio behavior).
/// 4. Full and `max_flavors > 1` → [`CoreError::SelectionLimitReached`],
///    selection unchanged.
pub fn toggle_flavor(
    current: &[Product],
    candidate: &Product,
    max_flavors: u32,
) -> CoreResult<Vec<Product>> {
    if current.iter().any(|f| f.id == candidate.id) {
        return Ok(current
            .iter()
            .filter(|f| f.id != candidate.id)
            .cloned()
            .collect());
    }

    if current.len() < max_flavors as usize {
        let mut next = current.to_vec();
        next.push(candidate.clone());
        return Ok(next);
    }

    if max_flavors == 1 {
        return Ok(vec![candidate.clone()]);
    }

    Err(CoreError::SelectionLimitReached { max: max_flavors })
}

/// The cashier's choices for one product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub size_id: Option<String>,
    /// In the order they were picked.
    pub addon_ids: Vec<String>,
    /// In the order they were picked.
    pub flavors: Vec<Product>,
}

impl SelectionState {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves the selected size against the product.
    ///
    /// ## Errors
    /// [`CoreError::SizeNotFound`] if the stored id is not one of the
    /// product's sizes.
    pub fn selected_size<'p>(&self, product: &'p Product) -> CoreResult<Option<&'p Size>> {
        match &self.size_id {
            None => Ok(None),
            Some(id) => product
                .size(id)
                .map(Some)
                .ok_or_else(|| CoreError::SizeNotFound {
                    product_id: product.id.clone(),
                    size_id: id.clone(),
                }),
        }
    }

    /// Ids of the selected flavors, in selection order.
    pub fn flavor_ids(&self) -> Vec<String> {
        self.flavors.iter().map(|f| f.id.clone()).collect()
    }

    /// Selects a size. Flavor prices are keyed by size name, so any chosen
    /// flavors are cleared, even when the same size is picked again.
    pub fn select_size(&self, product: &Product, size_id: &str) -> CoreResult<Self> {
        let size = product.size(size_id).ok_or_else(|| CoreError::SizeNotFound {
            product_id: product.id.clone(),
            size_id: size_id.to_string(),
        })?;

        Ok(SelectionState {
            size_id: Some(size.id.clone()),
            addon_ids: self.addon_ids.clone(),
            flavors: Vec::new(),
        })
    }

    /// Removes the size (and, with it, the flavors).
    pub fn clear_size(&self) -> Self {
        SelectionState {
            size_id: None,
            addon_ids: self.addon_ids.clone(),
            flavors: Vec::new(),
        }
    }

    /// Toggles an addon, honoring its group's selection mode.
    ///
    /// In a `single` group, picking an addon drops any other addon of the
    /// same group; tapping the selected one again clears it. Groups never
    /// affect each other.
    pub fn toggle_addon(&self, product: &Product, addon_id: &str) -> CoreResult<Self> {
        let (group, _) = product
            .find_addon(addon_id)
            .ok_or_else(|| CoreError::AddonNotFound {
                product_id: product.id.clone(),
                addon_id: addon_id.to_string(),
            })?;

        let already_selected = self.addon_ids.iter().any(|id| id == addon_id);

        let mut addon_ids: Vec<String> = match group.mode {
            SelectionMode::Multi => self.addon_ids.clone(),
            SelectionMode::Single => self
                .addon_ids
                .iter()
                .filter(|id| !group.contains(id))
                .cloned()
                .collect(),
        };

        if already_selected {
            addon_ids.retain(|id| id != addon_id);
        } else {
            addon_ids.push(addon_id.to_string());
        }

        Ok(SelectionState {
            size_id: self.size_id.clone(),
            addon_ids,
            flavors: self.flavors.clone(),
        })
    }

    /// Toggles a flavor using the limit for the currently selected size.
    ///
    /// ## Errors
    /// - [`CoreError::NotAFlavor`] if `candidate` is not drawn from the
    ///   product's flavor category
    /// - [`CoreError::SelectionLimitReached`] if the selection is full
    pub fn toggle_flavor(&self, product: &Product, candidate: &Product) -> CoreResult<Self> {
        if !product.accepts_flavor(candidate) {
            return Err(CoreError::NotAFlavor {
                product_id: product.id.clone(),
                flavor_id: candidate.id.clone(),
            });
        }

        let max = self.max_flavors(product)?;
        let flavors = toggle_flavor(&self.flavors, candidate, max)?;

        Ok(SelectionState {
            size_id: self.size_id.clone(),
            addon_ids: self.addon_ids.clone(),
            flavors,
        })
    }

    /// Flavor limit at the currently selected size.
    pub fn max_flavors(&self, product: &Product) -> CoreResult<u32> {
        let size = self.selected_size(product)?;
        Ok(effective_max_flavors(product, size.map(|s| s.name.as_str())))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
