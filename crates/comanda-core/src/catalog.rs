//! # Catalog Snapshot
//!
//! The in-memory copy of the catalog the engine works against. The terminal
//! fetches it from the catalog service and hands it over already resolved;
//! nothing here performs I/O.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Category, Product};
use crate::validation::validate_product;

/// Products and categories as returned by `GET /products` and
/// `GET /categories`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Parses a catalog payload.
    ///
    /// ## Example
    /// ```rust
    /// use comanda_core::catalog::Catalog;
    ///
    /// let catalog = Catalog::from_json(r#"{
    ///     "products": [{ "id": "soda", "name": "Guarana", "priceCents": 600 }],
    ///     "categories": [{ "id": "drinks", "name": "Drinks" }]
    /// }"#).unwrap();
    ///
    /// assert!(catalog.product("soda").is_ok());
    /// ```
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> CoreResult<&Product> {
        self.products
            .iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CoreError::ProductNotFound(product_id.to_string()))
    }

    /// Active products, optionally restricted to one category.
    pub fn active_products(&self, category_id: Option<&str>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_active)
            .filter(|p| match category_id {
                Some(id) => p.category_id.as_deref() == Some(id),
                None => true,
            })
            .collect()
    }

    /// Active flavor options for a pizza product, in catalog order.
    ///
    /// Empty for products without a pizza configuration.
    pub fn flavors_for(&self, product: &Product) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_active && product.accepts_flavor(p))
            .collect()
    }

    /// Looks up one flavor option of `product`.
    pub fn flavor(&self, product: &Product, flavor_id: &str) -> CoreResult<&Product> {
        let candidate = self.product(flavor_id)?;

        if !product.accepts_flavor(candidate) {
            return Err(CoreError::NotAFlavor {
                product_id: product.id.clone(),
                flavor_id: flavor_id.to_string(),
            });
        }

        Ok(candidate)
    }

    /// Runs [`validate_product`] over every product.
    pub fn validate(&self) -> CoreResult<()> {
        for product in &self.products {
            validate_product(product)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
