//! # Cart Line Items
//!
//! The engine's output: one priced, configured entry of an order in progress.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (live, may change)          CartLineItem (frozen at confirm)  │
//! │  ─────────────────────────           ──────────────────────────────    │
//! │  Size "Large" 40.00  ───────────────► size_snapshot  {s1, Large, 4000} │
//! │  Addon "Bacon" 3.50  ───────────────► addons_snapshot [{a1, Bacon,350}]│
//! │  Flavor "Calabresa"  ───────────────► flavors_snapshot [{f2, .., 4200}]│
//! │                                       unit_price_cents = 4550          │
//! │                                                                         │
//! │  If the catalog price changes after confirm, the line keeps the price  │
//! │  the customer agreed to. Nothing recalculates it later.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{compose_display_name, compute_unit_price, resolve_flavor_price};
use crate::selection::SelectionState;
use crate::types::Product;
use crate::validation::{validate_observation, validate_quantity};

/// Frozen copy of a chosen size or addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceSnapshot {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

/// Frozen copy of a chosen flavor, priced at the selected size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlavorSnapshot {
    pub id: String,
    pub name: String,
    /// `None` when the flavor had no price at this size.
    pub price_cents: Option<i64>,
}

/// Identity used to merge identical configurations in the cart.
///
/// Addon and flavor ids are sorted, so picking the same extras in a
/// different order still counts as the same item. The observation is not
/// part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    product_id: String,
    size_id: Option<String>,
    addon_ids: Vec<String>,
    flavor_ids: Vec<String>,
}

/// One priced, configured entry in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Local id, unique within the cart session.
    pub id: String,
    pub product_id: String,
    /// `Name (Size) [Flavor1/Flavor2]`
    pub name: String,
    /// Fixed at confirm time.
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Free-text note for the kitchen.
    pub observation: String,
    pub size_id: Option<String>,
    pub addon_ids: Vec<String>,
    pub flavor_ids: Vec<String>,
    pub size_snapshot: Option<ChoiceSnapshot>,
    pub addons_snapshot: Vec<ChoiceSnapshot>,
    pub flavors_snapshot: Vec<FlavorSnapshot>,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Extended price (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Key used by the cart to merge identical configurations.
    pub fn key(&self) -> LineKey {
        let mut addon_ids = self.addon_ids.clone();
        addon_ids.sort();
        let mut flavor_ids = self.flavor_ids.clone();
        flavor_ids.sort();

        LineKey {
            product_id: self.product_id.clone(),
            size_id: self.size_id.clone(),
            addon_ids,
            flavor_ids,
        }
    }
}

/// Fresh line id (UUID v4) for callers without their own id source.
pub fn new_line_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds a cart-ready line item from a product and a selection.
///
/// Does not touch any cart; appending is the caller's job.
///
/// ## Errors
/// - `Validation` if `quantity` is outside 1..=999 or the observation is too long
/// - `SizeNotFound` / `AddonNotFound` / `NotAFlavor` if the selection does not
///   belong to `product`
/// - `UnresolvablePrice` if no price can be determined
///
/// ## Example
/// ```rust
/// use comanda_core::line_item::build_line_item;
/// use comanda_core::selection::SelectionState;
/// use comanda_core::types::Product;
///
/// let soda: Product = serde_json::from_str(
///     r#"{ "id": "soda", "name": "Guarana", "priceCents": 600 }"#,
/// ).unwrap();
///
/// let line = build_line_item("line-1", &soda, &SelectionState::new(), 2, "no ice").unwrap();
/// assert_eq!(line.name, "Guarana");
/// assert_eq!(line.line_total().cents(), 1200);
///
/// assert!(build_line_item("line-2", &soda, &SelectionState::new(), 0, "").is_err());
/// ```
pub fn build_line_item(
    line_id: impl Into<String>,
    product: &Product,
    selection: &SelectionState,
    quantity: i64,
    observation: &str,
) -> CoreResult<CartLineItem> {
    validate_quantity(quantity)?;
    let observation = validate_observation(observation)?;

    let size = selection.selected_size(product)?;

    let mut addons_snapshot = Vec::with_capacity(selection.addon_ids.len());
    for addon_id in &selection.addon_ids {
        let (_, addon) = product
            .find_addon(addon_id)
            .ok_or_else(|| CoreError::AddonNotFound {
                product_id: product.id.clone(),
                addon_id: addon_id.clone(),
            })?;
        addons_snapshot.push(ChoiceSnapshot {
            id: addon.id.clone(),
            name: addon.name.clone(),
            price_cents: addon.price_cents,
        });
    }

    if let Some(stray) = selection.flavors.iter().find(|f| !product.accepts_flavor(f)) {
        return Err(CoreError::NotAFlavor {
            product_id: product.id.clone(),
            flavor_id: stray.id.clone(),
        });
    }

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
    )?;

    let flavors_snapshot = selection
        .flavors
        .iter()
        .map(|flavor| FlavorSnapshot {
            id: flavor.id.clone(),
            name: flavor.name.clone(),
            price_cents: resolve_flavor_price(flavor, size).map(|m| m.cents()),
        })
        .collect();

    Ok(CartLineItem {
        id: line_id.into(),
        product_id: product.id.clone(),
        name: compose_display_name(product, size, &selection.flavors),
        unit_price_cents: unit_price.cents(),
        quantity,
        observation,
        size_id: size.map(|s| s.id.clone()),
        addon_ids: selection.addon_ids.clone(),
        flavor_ids: selection.flavor_ids(),
        size_snapshot: size.map(|s| ChoiceSnapshot {
            id: s.id.clone(),
            name: s.name.clone(),
            price_cents: s.price_cents,
        }),
        addons_snapshot,
        flavors_snapshot,
        added_at: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::{PizzaConfig, PriceRule, Size};
    use std::collections::BTreeMap;

    fn size(id: &str, name: &str, price_cents: i64) -> Size {
        Size {
            id: id.to_string(),
            name: name.to_string(),
            price_cents,
        }
    }

    fn flavor(id: &str, name: &str, price_cents: i64, sizes: Vec<Size>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price_cents: Some(price_cents),
            category_id: Some("cat1".to_string()),
            is_active: true,
            sizes,
            addon_groups: vec![],
            pizza_config: None,
        }
    }

    fn pizza_grande() -> Product {
        Product {
            id: "pizza-grande".to_string(),
            name: "Pizza Grande".to_string(),
            price_cents: None,
            category_id: Some("cat-pizzas".to_string()),
            is_active: true,
            sizes: vec![size("s1", "Large", 4000)],
            addon_groups: vec![],
            pizza_config: Some(PizzaConfig {
                flavor_category_id: "cat1".to_string(),
                price_rule: Some(PriceRule::Higher),
                max_flavors: Some(1),
                sizes: BTreeMap::new(),
            }),
        }
    }

    #[test]
    fn test_end_to_end_pizza_scenario() {
        let product = pizza_grande();
        let mussarela = flavor("f1", "Mussarela", 3500, vec![]);
        let calabresa = flavor("f2", "Calabresa", 3800, vec![size("x1", "Large", 4200)]);

        let selection = SelectionState::new()
            .select_size(&product, "s1")
            .unwrap()
            .toggle_flavor(&product, &mussarela)
            .unwrap()
            .toggle_flavor(&product, &calabresa)
            .unwrap();

        // max_flavors = 1, so Calabresa replaced Mussarela
        assert_eq!(selection.flavor_ids(), vec!["f2"]);

        let line = build_line_item("l1", &product, &selection, 1, "").unwrap();
        assert_eq!(line.unit_price_cents, 4200);
        assert_eq!(line.name, "Pizza Grande (Large) [Calabresa]");
        assert_eq!(line.size_id.as_deref(), Some("s1"));
        assert_eq!(
            line.size_snapshot,
            Some(ChoiceSnapshot {
                id: "s1".to_string(),
                name: "Large".to_string(),
                price_cents: 4000,
            })
        );
        assert_eq!(line.flavors_snapshot[0].price_cents, Some(4200));
    }

    #[test]
    fn test_rejects_invalid_quantity() {
        let product = pizza_grande();
        let selection = SelectionState::new().select_size(&product, "s1").unwrap();

        let zero = build_line_item("l1", &product, &selection, 0, "");
        assert!(matches!(
            zero,
            Err(CoreError::Validation(ValidationError::MustBePositive { .. }))
        ));

        let negative = build_line_item("l1", &product, &selection, -3, "");
        assert!(negative.is_err());
    }

    #[test]
    fn test_rejects_unresolvable_price() {
        let mut product = pizza_grande();
        product.sizes.clear();
        let mut ghost = flavor("f1", "Ghost", 0, vec![]);
        ghost.price_cents = None;

        let selection = SelectionState::new().toggle_flavor(&product, &ghost).unwrap();
        let result = build_line_item("l1", &product, &selection, 1, "");
        assert!(matches!(result, Err(CoreError::UnresolvablePrice { .. })));
    }

    #[test]
    fn test_rejects_selection_from_another_product() {
        let product = pizza_grande();
        let selection = SelectionState {
            size_id: Some("s9".to_string()),
            ..SelectionState::default()
        };
        assert!(matches!(
            build_line_item("l1", &product, &selection, 1, ""),
            Err(CoreError::SizeNotFound { .. })
        ));

        let selection = SelectionState {
            addon_ids: vec!["a9".to_string()],
            ..SelectionState::default()
        };
        assert!(matches!(
            build_line_item("l1", &product, &selection, 1, ""),
            Err(CoreError::AddonNotFound { .. })
        ));
    }

    #[test]
    fn test_snapshots_survive_catalog_changes() {
        let mut product = pizza_grande();
        product.pizza_config = None;
        let selection = SelectionState::new().select_size(&product, "s1").unwrap();
        let line = build_line_item("l1", &product, &selection, 2, " extra napkins ").unwrap();

        product.sizes[0].price_cents = 9900;

        assert_eq!(line.unit_price().cents(), 4000);
        assert_eq!(line.line_total().cents(), 8000);
        assert_eq!(line.observation, "extra napkins");
    }

    #[test]
    fn test_key_ignores_order_and_observation() {
        let product = pizza_grande();
        let selection = SelectionState::new().select_size(&product, "s1").unwrap();
        let base = build_line_item("l1", &product, &selection, 1, "a").unwrap();

        let mut a = base.clone();
        a.addon_ids = vec!["x".to_string(), "y".to_string()];
        let mut b = base.clone();
        b.id = "l2".to_string();
        b.observation = "different".to_string();
        b.addon_ids = vec!["y".to_string(), "x".to_string()];

        assert_eq!(a.key(), b.key());

        b.size_id = None;
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_new_line_ids_are_unique() {
        assert_ne!(new_line_id(), new_line_id());
    }
}
