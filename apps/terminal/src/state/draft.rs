//! # Draft State
//!
//! The product currently open in the options modal: its selection, the
//! quantity on the stepper and the kitchen note. At most one draft exists
//! per terminal.
//!
//! ```text
//! open_product ──► Some(Draft) ──► select_size / toggle_* / set_* ──┐
//!                        ▲                                          │
//!                        └──────────────────────────────────────────┘
//!                        │
//!        confirm_draft / cancel_draft ──► None
//! ```
//!
//! Each command runs under the lock, so selection events from several
//! threads are applied one at a time in arrival order.

use std::sync::{Mutex, PoisonError};

use comanda_core::{Product, SelectionState};

/// A product being configured.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Product as it was when the modal opened
    pub product: Product,
    pub selection: SelectionState,
    pub quantity: i64,
    pub observation: String,
}

impl Draft {
    /// Opens a draft with an empty selection, quantity 1 and no note.
    pub fn open(product: Product) -> Self {
        Draft {
            product,
            selection: SelectionState::new(),
            quantity: 1,
            observation: String::new(),
        }
    }
}

/// The terminal's draft slot.
#[derive(Debug, Default)]
pub struct DraftState {
    draft: Mutex<Option<Draft>>,
}

impl DraftState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with access to the draft slot.
    pub fn with_slot<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Option<Draft>) -> R,
    {
        let mut slot = self.draft.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut slot)
    }

    /// Executes a function on the open draft, or returns `None` when the
    /// modal is closed.
    pub fn with_draft_mut<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Draft) -> R,
    {
        self.with_slot(|slot| slot.as_mut().map(f))
    }

    /// Whether a product is open.
    pub fn is_open(&self) -> bool {
        self.with_slot(|slot| slot.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soda() -> Product {
        serde_json::from_str(r#"{ "id": "soda", "name": "Guarana", "priceCents": 600 }"#).unwrap()
    }

    #[test]
    fn test_open_defaults() {
        let draft = Draft::open(soda());
        assert_eq!(draft.quantity, 1);
        assert!(draft.observation.is_empty());
        assert_eq!(draft.selection, SelectionState::new());
    }

    #[test]
    fn test_closed_slot() {
        let state = DraftState::new();
        assert!(!state.is_open());
        assert_eq!(state.with_draft_mut(|d| d.quantity), None);

        state.with_slot(|slot| *slot = Some(Draft::open(soda())));
        assert!(state.is_open());
        assert_eq!(state.with_draft_mut(|d| d.quantity), Some(1));
    }
}
