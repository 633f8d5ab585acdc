//! # Catalog State
//!
//! The catalog snapshot the terminal prices against. Commands take a cheap
//! `Arc` clone, so a reload never changes a catalog a command is already
//! reading.

use std::sync::{Arc, PoisonError, RwLock};

use comanda_core::Catalog;

/// Shared catalog snapshot, replaced wholesale on reload.
#[derive(Debug, Default)]
pub struct CatalogState {
    catalog: RwLock<Arc<Catalog>>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: RwLock::new(Arc::new(catalog)),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.catalog.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Swaps in a new catalog.
    pub fn replace(&self, catalog: Catalog) {
        let mut guard = self.catalog.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_old_snapshots() {
        let state = CatalogState::new(
            Catalog::from_json(r#"{ "products": [{ "id": "a", "name": "A", "priceCents": 1 }] }"#)
                .unwrap(),
        );
        let before = state.snapshot();

        state.replace(Catalog::default());

        assert_eq!(before.products.len(), 1);
        assert!(state.snapshot().products.is_empty());
    }
}
