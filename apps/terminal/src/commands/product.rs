//! # Product Commands
//!
//! The product grid, the flavor list inside the options modal, and catalog
//! reloads pushed by the front end after it fetched `GET /products`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use comanda_core::pricing::resolve_flavor_price;
use comanda_core::{Catalog, CoreError, Product};

use crate::error::ApiError;
use crate::state::CatalogState;

/// Product tile on the grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub category_id: Option<String>,

    /// Cheapest size, or the flat price when the product has no sizes
    pub from_price_cents: Option<i64>,

    /// Tapping the tile opens the options modal instead of adding directly
    pub has_options: bool,
    pub is_pizza: bool,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        let from_price_cents = p
            .sizes
            .iter()
            .map(|s| s.price_cents)
            .min()
            .or(p.price_cents);

        ProductDto {
            id: p.id.clone(),
            name: p.name.clone(),
            category_id: p.category_id.clone(),
            from_price_cents,
            has_options: !p.sizes.is_empty() || !p.addon_groups.is_empty() || p.is_pizza(),
            is_pizza: p.is_pizza(),
        }
    }
}

/// One flavor button in the options modal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlavorOptionDto {
    pub id: String,
    pub name: String,

    /// Price at the requested size, `None` if the flavor has no price there
    pub price_cents: Option<i64>,
}

/// Lists active products, optionally for one category.
pub fn list_products(catalog: &CatalogState, category_id: Option<&str>) -> Vec<ProductDto> {
    debug!(category_id = ?category_id, "list_products command");

    catalog
        .snapshot()
        .active_products(category_id)
        .into_iter()
        .map(ProductDto::from)
        .collect()
}

/// Lists the flavors a pizza product accepts.
///
/// Prices are resolved against `size_id` of the pizza the same way the
/// engine prices the line: by size name, then the flavor's own price.
pub fn get_flavor_options(
    catalog: &CatalogState,
    product_id: &str,
    size_id: Option<&str>,
) -> Result<Vec<FlavorOptionDto>, ApiError> {
    debug!(product_id = %product_id, size_id = ?size_id, "get_flavor_options command");

    let catalog = catalog.snapshot();
    let product = catalog.product(product_id)?;

    let size = match size_id {
        Some(id) => Some(product.size(id).ok_or_else(|| CoreError::SizeNotFound {
            product_id: product.id.clone(),
            size_id: id.to_string(),
        })?),
        None => None,
    };

    Ok(catalog
        .flavors_for(product)
        .into_iter()
        .map(|flavor| FlavorOptionDto {
            id: flavor.id.clone(),
            name: flavor.name.clone(),
            price_cents: resolve_flavor_price(flavor, size).map(|m| m.cents()),
        })
        .collect())
}

/// Replaces the catalog with a freshly fetched payload.
///
/// The payload is validated before it is swapped in; on error the old
/// catalog stays active.
///
/// ## Returns
/// Number of products in the new catalog.
pub fn reload_catalog(catalog: &CatalogState, json: &str) -> Result<usize, ApiError> {
    debug!(bytes = json.len(), "reload_catalog command");

    let next = Catalog::from_json(json)?;
    next.validate()?;

    let count = next.products.len();
    catalog.replace(next);

    info!(products = count, "Catalog reloaded");
    Ok(count)
}

// =============================================================================
// Unit Tests
// =============================================================================
